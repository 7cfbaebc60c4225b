use std::time::Duration;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::NOT_RECORDED_FOOTER;
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;
use warden_utils::embed::Reply;

pub const META: CommandMeta = CommandMeta {
    name: "purge",
    desc: "Bulk delete recent messages in this channel.",
    category: "moderation",
    usage: "!purge <amount>",
    params: &[Param::integer("amount", "How many messages to delete (1-100)")],
    permission: Some(serenity::Permissions::MANAGE_MESSAGES),
    mod_only: true,
    guild_only: true,
};

pub const MAX_PURGE: u8 = 100;

/// Prefix confirmations are removed after this since the command message is gone.
const CONFIRMATION_LIFETIME: Duration = Duration::from_secs(3);

/// Messages to ask for: the request plus the command message for prefix
/// invocations, capped at the bulk delete limit.
pub fn delete_limit(requested: u64, include_command_message: bool) -> u8 {
    let wanted = requested.saturating_add(u64::from(include_command_message));
    u8::try_from(wanted.min(u64::from(MAX_PURGE))).unwrap_or(MAX_PURGE)
}

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(requested) = ctx
        .args
        .integer("amount")
        .and_then(|amount| u64::try_from(amount).ok())
        .filter(|amount| *amount > 0)
    else {
        return ctx
            .say("Please provide a number of messages to delete (1-100).")
            .await;
    };

    let is_prefix = ctx.invocation.is_prefix();
    let limit = delete_limit(requested, is_prefix);

    let deleted = match ctx.platform.bulk_delete(ctx.channel_id(), limit).await {
        Ok(deleted) => deleted,
        Err(source) => {
            log_platform_failure(&source, "bulk_delete");
            return ctx
                .say("Failed to delete messages. I need the Manage Messages permission.")
                .await;
        }
    };

    let reported = if is_prefix {
        deleted.saturating_sub(1)
    } else {
        deleted
    };

    let reason = format!(
        "Purged {} message(s) in <#{}>",
        reported,
        ctx.channel_id().get()
    );
    let recorded = record_modlog(&ctx, guild_id, ModAction::Purge, ctx.author_id(), &reason).await;

    let mut text = format!("Purged {reported} message(s).");
    if !recorded {
        text.push('\n');
        text.push_str(NOT_RECORDED_FOOTER);
    }

    if is_prefix {
        ctx.platform
            .announce(ctx.channel_id(), Reply::text(text), Some(CONFIRMATION_LIFETIME))
            .await
    } else {
        ctx.reply(Reply::text(text).ephemeral()).await
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_PURGE, delete_limit};

    #[test]
    fn limit_is_clamped() {
        assert_eq!(delete_limit(150, true), MAX_PURGE);
        assert_eq!(delete_limit(150, false), MAX_PURGE);
        assert_eq!(delete_limit(100, true), MAX_PURGE);
        assert_eq!(delete_limit(99, true), 100);
        assert_eq!(delete_limit(10, true), 11);
        assert_eq!(delete_limit(10, false), 10);
        assert_eq!(delete_limit(u64::MAX, true), MAX_PURGE);
    }
}
