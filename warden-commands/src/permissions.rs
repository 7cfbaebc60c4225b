use poise::serenity_prelude as serenity;
use tracing::warn;

use warden_core::{Error, Invocation, Platform};
use warden_utils::embed::{Reply, permission_denied_embed};
use warden_utils::permissions::{grants, permission_names};

/// Resolve the invoker's guild permissions, preferring what the platform
/// already attached to the invocation.
pub async fn resolve_permissions(
    platform: &dyn Platform,
    invocation: &Invocation,
) -> Result<serenity::Permissions, Error> {
    if let Some(permissions) = invocation.author_permissions {
        return Ok(permissions);
    }

    match invocation.guild_id {
        Some(guild_id) => platform
            .member_permissions(guild_id, invocation.author_id)
            .await,
        None => Ok(serenity::Permissions::empty()),
    }
}

/// Check `required` and answer with a denial when it isn't met.
///
/// Returns whether the invoker may continue. Nothing happens on allow.
pub async fn check_permission(
    platform: &dyn Platform,
    invocation: &Invocation,
    required: serenity::Permissions,
) -> Result<bool, Error> {
    let permissions = resolve_permissions(platform, invocation).await?;
    if grants(permissions, required) {
        return Ok(true);
    }

    let denial = Reply::embed(permission_denied_embed(format!(
        "You need the following permission(s): {}",
        permission_names(required).join(", ")
    )))
    .ephemeral();

    if let Err(source) = platform.reply(invocation, denial).await {
        warn!(?source, command = %invocation.command, "failed to send permission denial");
    }

    Ok(false)
}

/// Whether the invoker holds one of the configured moderator roles.
/// An empty configuration lets everyone through.
pub fn holds_mod_role(configured: &[u64], held: &[serenity::RoleId]) -> bool {
    configured.is_empty() || held.iter().any(|role| configured.contains(&role.get()))
}

pub fn mod_role_denied() -> Reply {
    Reply::embed(permission_denied_embed(
        "You need a moderator role to use this command.",
    ))
    .ephemeral()
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::holds_mod_role;

    #[test]
    fn empty_mod_role_list_passes() {
        assert!(holds_mod_role(&[], &[]));
        assert!(holds_mod_role(&[], &[serenity::RoleId::new(5)]));
    }

    #[test]
    fn configured_list_requires_membership() {
        assert!(!holds_mod_role(&[5], &[]));
        assert!(!holds_mod_role(&[5], &[serenity::RoleId::new(6)]));
        assert!(holds_mod_role(
            &[5, 7],
            &[serenity::RoleId::new(6), serenity::RoleId::new(7)]
        ));
    }
}
