use poise::serenity_prelude as serenity;

use warden_core::{Error, Platform};
use warden_database::Store;

/// Grant or revoke the role bound to `emoji` on `message_id`.
///
/// Returns whether a binding matched and the role change went through.
pub async fn sync_reaction_role(
    store: &dyn Store,
    platform: &dyn Platform,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    message_id: serenity::MessageId,
    emoji: &str,
    added: bool,
) -> Result<bool, Error> {
    let Some(binding) = store
        .reaction_role(guild_id.get(), message_id.get(), emoji)
        .await?
    else {
        return Ok(false);
    };

    let role_id = serenity::RoleId::new(binding.role_id);
    if added {
        platform
            .add_role(guild_id, user_id, role_id, "Reaction role")
            .await?;
    } else {
        platform
            .remove_role(guild_id, user_id, role_id, "Reaction role removed")
            .await?;
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::sync_reaction_role;
    use warden_core::testing::{PlatformCall, RecordingPlatform};
    use warden_database::model::roles::NewReactionRole;
    use warden_database::{MemoryStore, RoleStore};

    const GUILD: serenity::GuildId = serenity::GuildId::new(10);
    const USER: serenity::UserId = serenity::UserId::new(30);
    const MESSAGE: serenity::MessageId = serenity::MessageId::new(700);

    async fn bound_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_reaction_role(NewReactionRole {
                guild_id: GUILD.get(),
                channel_id: 20,
                message_id: MESSAGE.get(),
                role_id: 501,
                emoji: "✅".to_owned(),
            })
            .await
            .expect("binding");
        store
    }

    #[tokio::test]
    async fn adding_and_removing_reactions_toggle_the_role() {
        let store = bound_store().await;
        let platform = RecordingPlatform::new();

        let added = sync_reaction_role(&store, &platform, GUILD, USER, MESSAGE, "✅", true)
            .await
            .expect("sync");
        let removed = sync_reaction_role(&store, &platform, GUILD, USER, MESSAGE, "✅", false)
            .await
            .expect("sync");

        assert!(added && removed);
        assert_eq!(
            platform.calls(),
            vec![
                PlatformCall::AddRole {
                    user_id: USER,
                    role_id: serenity::RoleId::new(501),
                },
                PlatformCall::RemoveRole {
                    user_id: USER,
                    role_id: serenity::RoleId::new(501),
                },
            ]
        );
    }

    #[tokio::test]
    async fn unbound_emoji_is_ignored() {
        let store = bound_store().await;
        let platform = RecordingPlatform::new();

        let matched = sync_reaction_role(&store, &platform, GUILD, USER, MESSAGE, "❌", true)
            .await
            .expect("sync");

        assert!(!matched);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn role_failures_surface() {
        let store = bound_store().await;
        let platform = RecordingPlatform::new();
        platform.fail_on("add_role");

        let result = sync_reaction_role(&store, &platform, GUILD, USER, MESSAGE, "✅", true).await;
        assert!(result.is_err());
    }
}
