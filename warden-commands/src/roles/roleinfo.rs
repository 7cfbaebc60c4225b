use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::{Error, Param, RoleSummary};
use warden_utils::embed::{DEFAULT_EMBED_COLOR, ReplyEmbed};
use warden_utils::formatting::relative_timestamp;

pub const META: CommandMeta = CommandMeta {
    name: "roleinfo",
    desc: "Show details about a role.",
    category: "roles",
    usage: "!roleinfo <role>",
    params: &[Param::role("role", "The role to inspect")],
    permission: None,
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(role_id) = ctx.args.role("role") else {
        return ctx.usage().await;
    };

    let roles = ctx.platform.guild_roles(guild_id).await?;
    let Some(role) = roles.iter().find(|role| role.id == role_id) else {
        return ctx.say("I couldn't find that role.").await;
    };

    ctx.send_embed(role_embed(role)).await
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn role_embed(role: &RoleSummary) -> ReplyEmbed {
    let color = if role.colour == 0 {
        DEFAULT_EMBED_COLOR
    } else {
        role.colour
    };

    let mut embed = ReplyEmbed::new(format!("Role: {}", role.name), "")
        .color(color)
        .field("ID", role.id.get().to_string(), true)
        .field("Colour", format!("#{:06X}", role.colour), true)
        .field("Position", role.position.to_string(), true)
        .field("Mentionable", yes_no(role.mentionable), true)
        .field("Hoisted", yes_no(role.hoist), true);

    if let Some(count) = role.member_count {
        embed = embed.field("Members", count.to_string(), true);
    }

    let created = u64::try_from(role.created_at).unwrap_or_default();
    embed.field("Created", relative_timestamp(created), true)
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::role_embed;
    use warden_core::RoleSummary;

    #[test]
    fn colour_is_rendered_as_hex() {
        let role = RoleSummary {
            id: serenity::RoleId::new(9),
            name: "Helpers".to_owned(),
            colour: 0x3498DB,
            position: 4,
            mentionable: true,
            hoist: false,
            permissions: serenity::Permissions::empty(),
            created_at: 1_600_000_000,
            member_count: None,
        };

        let embed = role_embed(&role);
        assert_eq!(embed.title, "Role: Helpers");
        assert!(embed.fields.iter().any(|f| f.name == "Colour" && f.value == "#3498DB"));
        assert!(!embed.fields.iter().any(|f| f.name == "Members"));
    }
}
