use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::channel::remember_channel_state;
use crate::context::CommandContext;
use crate::moderation::embeds::{platform_failure_message, with_record_status};
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;
use warden_database::model::settings::ChannelSettingsUpdate;
use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};
use warden_utils::formatting::format_compact_duration;

pub const META: CommandMeta = CommandMeta {
    name: "slowmode",
    desc: "Set or show this channel's slowmode.",
    category: "channel",
    usage: "!slowmode [seconds]",
    params: &[Param::integer("seconds", "Delay between messages, 0-21600").optional()],
    permission: Some(serenity::Permissions::MANAGE_CHANNELS),
    mod_only: true,
    guild_only: true,
};

pub const MAX_SLOWMODE_SECS: u16 = 21_600;

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let channel_id = ctx.channel_id();

    let Some(raw_seconds) = ctx.args.integer("seconds") else {
        let stored = ctx.store.channel_settings(channel_id.get()).await?;
        let message = match stored.and_then(|setting| setting.slow_mode) {
            Some(seconds) if seconds > 0 => format!(
                "Slowmode in <#{}> is {}.",
                channel_id.get(),
                format_compact_duration(u64::from(seconds))
            ),
            _ => format!("Slowmode is off in <#{}>.", channel_id.get()),
        };
        return ctx.say(message).await;
    };

    let Some(seconds) = u16::try_from(raw_seconds)
        .ok()
        .filter(|seconds| *seconds <= MAX_SLOWMODE_SECS)
    else {
        return ctx
            .say(format!(
                "Slowmode must be between 0 and {MAX_SLOWMODE_SECS} seconds."
            ))
            .await;
    };

    if let Err(source) = ctx.platform.set_slowmode(channel_id, seconds).await {
        log_platform_failure(&source, "set_slowmode");
        return ctx
            .say(platform_failure_message("change slowmode here"))
            .await;
    }

    let reason = format!("Set slowmode to {seconds} seconds");
    let recorded =
        record_modlog(&ctx, guild_id, ModAction::Slowmode, ctx.author_id(), &reason).await;
    remember_channel_state(
        &ctx,
        guild_id,
        ChannelSettingsUpdate {
            slow_mode: Some(u32::from(seconds)),
            ..Default::default()
        },
    )
    .await;

    let description = if seconds == 0 {
        format!("Slowmode disabled in <#{}>.", channel_id.get())
    } else {
        format!(
            "Slowmode in <#{}> set to {}.",
            channel_id.get(),
            format_compact_duration(u64::from(seconds))
        )
    };

    let embed = ReplyEmbed::new("Slowmode updated", description).color(SUCCESS_COLOR);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
