use poise::serenity_prelude as serenity;
use tracing::{debug, error};

use crate::context::CommandContext;
use crate::moderation::embeds::is_missing_permissions_error;
use warden_database::model::moderation::{ModAction, NewModLog};
use warden_utils::embed::{DEFAULT_EMBED_COLOR, Reply, ReplyEmbed};
use warden_utils::formatting::{action_display_name, escape_mentions};

/// Append a mod log row. Returns whether it was written; failures are logged
/// so the handler can still report the completed platform action.
pub async fn record_modlog(
    ctx: &CommandContext,
    guild_id: serenity::GuildId,
    action: ModAction,
    user_id: serenity::UserId,
    reason: &str,
) -> bool {
    let entry = NewModLog {
        guild_id: guild_id.get(),
        user_id: user_id.get(),
        moderator_id: ctx.author_id().get(),
        action,
        reason: reason.to_owned(),
    };

    match ctx.store.create_modlog(entry).await {
        Ok(_) => true,
        Err(source) => {
            error!(?source, action = action.as_str(), "failed to record moderation action");
            false
        }
    }
}

/// Best-effort copy of an action into the guild's log channel. Only `warn` and
/// `clearwarns` use this; bans, kicks, timeouts and role changes reach the log channel
/// through the audit mirror.
pub async fn publish_to_log_channel(
    ctx: &CommandContext,
    guild_id: serenity::GuildId,
    action: &str,
    target_user_id: serenity::UserId,
    reason: &str,
) {
    let settings = match ctx.store.server_settings(guild_id.get()).await {
        Ok(settings) => settings,
        Err(source) => {
            error!(?source, "failed to read log channel setting");
            return;
        }
    };

    let Some(channel_id) = settings.log_channel_id else {
        return;
    };

    let description = [
        format!("**Action :** {}", action_display_name(action)),
        format!("**Target :** <@{}>", target_user_id.get()),
        format!("**Reason :** {}", escape_mentions(reason)),
        format!("**Moderator :** <@{}>", ctx.author_id().get()),
    ]
    .join("\n");

    let embed = ReplyEmbed::new("Moderation action", description)
        .color(DEFAULT_EMBED_COLOR)
        .timestamp();

    if let Err(source) = ctx
        .platform
        .announce(serenity::ChannelId::new(channel_id), Reply::embed(embed), None)
        .await
    {
        debug!(?source, "failed to publish moderation action to log channel");
    }
}

/// Missing-permission responses are expected; anything else is worth an error.
pub fn log_platform_failure(source: &anyhow::Error, operation: &'static str) {
    if is_missing_permissions_error(source) {
        debug!(?source, operation, "platform refused moderation request");
    } else {
        error!(?source, operation, "moderation request failed");
    }
}
