use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::channel::remember_channel_state;
use crate::context::CommandContext;
use crate::moderation::embeds::{DEFAULT_REASON, platform_failure_message, with_record_status};
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;
use warden_database::model::settings::ChannelSettingsUpdate;
use warden_utils::embed::{ReplyEmbed, WARNING_COLOR};
use warden_utils::formatting::escape_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "lock",
    desc: "Stop @everyone from sending messages in this channel.",
    category: "channel",
    usage: "!lock [reason]",
    params: &[Param::text("reason", "Why the channel is being locked").optional()],
    permission: Some(serenity::Permissions::MANAGE_CHANNELS),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let channel_id = ctx.channel_id();
    let reason = ctx.args.string("reason").unwrap_or(DEFAULT_REASON);

    if let Err(source) = ctx
        .platform
        .set_channel_locked(guild_id, channel_id, true)
        .await
    {
        log_platform_failure(&source, "set_channel_locked");
        return ctx.say(platform_failure_message("lock this channel")).await;
    }

    let recorded = record_modlog(&ctx, guild_id, ModAction::Lock, ctx.author_id(), reason).await;
    remember_channel_state(
        &ctx,
        guild_id,
        ChannelSettingsUpdate {
            locked: Some(true),
            ..Default::default()
        },
    )
    .await;

    let embed = ReplyEmbed::new(
        "🔒 Channel locked",
        format!("<#{}> has been locked.", channel_id.get()),
    )
    .color(WARNING_COLOR)
    .field("Reason", escape_mentions(reason), false);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
