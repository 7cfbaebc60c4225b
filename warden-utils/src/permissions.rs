use poise::serenity_prelude as serenity;

/// Convert a permission bitset into a sorted display list.
///
/// If `ADMINISTRATOR` is present, only `ADMINISTRATOR` is returned because
/// it implicitly grants all permissions.
pub fn permission_names(perms: serenity::Permissions) -> Vec<String> {
    if perms.contains(serenity::Permissions::ADMINISTRATOR) {
        return vec!["ADMINISTRATOR".to_owned()];
    }

    let mut names: Vec<String> = perms
        .iter_names()
        .map(|(name, _flag)| name.to_owned())
        .collect();
    names.sort_unstable();
    names
}

/// Whether `perms` satisfies `required`. Administrators satisfy everything.
pub fn grants(perms: serenity::Permissions, required: serenity::Permissions) -> bool {
    perms.contains(serenity::Permissions::ADMINISTRATOR) || perms.contains(required)
}

/// Merge guild-level role permissions for a member.
///
/// The `@everyone` role shares the guild's id and always applies.
pub fn combine_role_permissions<'a>(
    guild_id: serenity::GuildId,
    member_roles: &[serenity::RoleId],
    roles: impl IntoIterator<Item = (&'a serenity::RoleId, serenity::Permissions)>,
) -> serenity::Permissions {
    let everyone_role_id = serenity::RoleId::new(guild_id.get());
    let mut resolved = serenity::Permissions::empty();

    for (role_id, permissions) in roles {
        if *role_id == everyone_role_id || member_roles.contains(role_id) {
            resolved |= permissions;
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::{combine_role_permissions, grants, permission_names};

    #[test]
    fn administrator_grants_everything() {
        assert!(grants(
            serenity::Permissions::ADMINISTRATOR,
            serenity::Permissions::BAN_MEMBERS
        ));
        assert!(!grants(
            serenity::Permissions::KICK_MEMBERS,
            serenity::Permissions::BAN_MEMBERS
        ));
        assert!(grants(
            serenity::Permissions::KICK_MEMBERS | serenity::Permissions::BAN_MEMBERS,
            serenity::Permissions::BAN_MEMBERS
        ));
    }

    #[test]
    fn admin_collapses_permission_names() {
        assert_eq!(
            permission_names(serenity::Permissions::all()),
            vec!["ADMINISTRATOR".to_owned()]
        );
        assert_eq!(
            permission_names(serenity::Permissions::KICK_MEMBERS | serenity::Permissions::BAN_MEMBERS),
            vec!["BAN_MEMBERS".to_owned(), "KICK_MEMBERS".to_owned()]
        );
    }

    #[test]
    fn combines_everyone_and_member_roles() {
        let guild_id = serenity::GuildId::new(10);
        let everyone = serenity::RoleId::new(10);
        let moderator = serenity::RoleId::new(20);
        let unrelated = serenity::RoleId::new(30);

        let roles = vec![
            (everyone, serenity::Permissions::SEND_MESSAGES),
            (moderator, serenity::Permissions::KICK_MEMBERS),
            (unrelated, serenity::Permissions::BAN_MEMBERS),
        ];

        let resolved = combine_role_permissions(
            guild_id,
            &[moderator],
            roles.iter().map(|(id, perms)| (id, *perms)),
        );

        assert!(resolved.contains(serenity::Permissions::SEND_MESSAGES));
        assert!(resolved.contains(serenity::Permissions::KICK_MEMBERS));
        assert!(!resolved.contains(serenity::Permissions::BAN_MEMBERS));
    }
}
