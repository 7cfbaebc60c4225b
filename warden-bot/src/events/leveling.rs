use std::time::Instant;

use poise::serenity_prelude as serenity;
use tracing::debug;

use warden_commands::cooldown::{CooldownCheck, CooldownTracker};
use warden_commands::leveling::XP_PER_MESSAGE;
use warden_core::{Error, Platform};
use warden_database::Store;
use warden_utils::embed::Reply;
use warden_utils::time::now_unix_secs;

/// Award message XP to `user_id`, at most once per cooldown window per guild.
///
/// Returns the new level when the award crossed a level boundary.
pub async fn award_message_xp(
    store: &dyn Store,
    platform: &dyn Platform,
    cooldowns: &CooldownTracker,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
    user_id: serenity::UserId,
    now: Instant,
) -> Result<Option<i32>, Error> {
    let key = format!("xp:{}", guild_id.get());
    if let CooldownCheck::Active { .. } = cooldowns.check(&key, user_id, now) {
        return Ok(None);
    }

    let settings = store.server_settings(guild_id.get()).await?;
    if !settings.level_system {
        return Ok(None);
    }

    let award = store
        .add_xp(guild_id.get(), user_id.get(), XP_PER_MESSAGE, now_unix_secs())
        .await?;
    if !award.leveled_up {
        return Ok(None);
    }

    let level = award.profile.level;
    let message = format!("🎉 <@{}> reached level {level}!", user_id.get());
    if let Err(source) = platform.announce(channel_id, Reply::text(message), None).await {
        debug!(?source, user_id = user_id.get(), "failed to announce level up");
    }

    Ok(Some(level))
}
