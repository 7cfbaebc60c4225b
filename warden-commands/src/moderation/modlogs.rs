use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::Error;
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};
use warden_utils::formatting::{action_display_name, escape_mentions, relative_timestamp};

pub const META: CommandMeta = CommandMeta {
    name: "modlogs",
    desc: "Show the latest moderation actions in this server.",
    category: "moderation",
    usage: "!modlogs",
    params: &[],
    permission: Some(serenity::Permissions::VIEW_AUDIT_LOG),
    mod_only: false,
    guild_only: true,
};

const MODLOG_PAGE: u32 = 10;

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let entries = ctx.store.recent_modlogs(guild_id.get(), MODLOG_PAGE).await?;

    if entries.is_empty() {
        return ctx.say("No moderation actions recorded yet.").await;
    }

    let description = entries
        .iter()
        .map(|entry| {
            format!(
                "**{}** <@{}> by <@{}> {}\n{}",
                action_display_name(&entry.action),
                entry.user_id,
                entry.moderator_id,
                relative_timestamp(entry.created_at),
                escape_mentions(entry.reason.as_deref().unwrap_or("No reason provided"))
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    ctx.send_embed(ReplyEmbed::new("Recent moderation actions", description).color(INFO_COLOR))
        .await
}
