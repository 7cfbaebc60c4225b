use poise::serenity_prelude as serenity;
use tracing::{error, warn};

use warden_core::Platform;
use warden_database::Store;

const AUTO_ROLE_REASON: &str = "Auto role";

/// Give a new member every enabled auto role. Returns how many were granted.
pub async fn grant_auto_roles(
    store: &dyn Store,
    platform: &dyn Platform,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> usize {
    let roles = match store.auto_roles(guild_id.get()).await {
        Ok(roles) => roles,
        Err(source) => {
            error!(?source, guild_id = guild_id.get(), "failed to load auto roles");
            return 0;
        }
    };

    let mut granted = 0;
    for role in roles {
        let role_id = serenity::RoleId::new(role.role_id);
        match platform
            .add_role(guild_id, user_id, role_id, AUTO_ROLE_REASON)
            .await
        {
            Ok(()) => granted += 1,
            Err(source) => warn!(
                ?source,
                guild_id = guild_id.get(),
                role_id = role.role_id,
                "failed to grant auto role"
            ),
        }
    }

    granted
}
