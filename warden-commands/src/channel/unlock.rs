use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::channel::remember_channel_state;
use crate::context::CommandContext;
use crate::moderation::embeds::{DEFAULT_REASON, platform_failure_message, with_record_status};
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;
use warden_database::model::settings::ChannelSettingsUpdate;
use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};
use warden_utils::formatting::escape_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "unlock",
    desc: "Let @everyone send messages in this channel again.",
    category: "channel",
    usage: "!unlock [reason]",
    params: &[Param::text("reason", "Why the channel is being unlocked").optional()],
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
        .set_channel_locked(guild_id, channel_id, false)
        .await
    {
        log_platform_failure(&source, "set_channel_locked");
        return ctx.say(platform_failure_message("unlock this channel")).await;
    }

    let recorded = record_modlog(&ctx, guild_id, ModAction::Unlock, ctx.author_id(), reason).await;
    remember_channel_state(
        &ctx,
        guild_id,
        ChannelSettingsUpdate {
            locked: Some(false),
            ..Default::default()
        },
    )
    .await;

    let embed = ReplyEmbed::new(
        "🔓 Channel unlocked",
        format!("<#{}> has been unlocked.", channel_id.get()),
    )
    .color(SUCCESS_COLOR)
    .field("Reason", escape_mentions(reason), false);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
