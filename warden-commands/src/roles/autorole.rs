use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::{Error, Param};
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "autorole",
    desc: "Manage roles given to members when they join.",
    category: "roles",
    usage: "!autorole <add|remove|list> [role]",
    params: &[
        Param::word("action", "add, remove or list"),
        Param::role("role", "The role to add or remove").optional(),
    ],
    permission: Some(serenity::Permissions::MANAGE_ROLES),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let action = ctx.args.string("action").map(str::to_lowercase);
    let role_id = ctx.args.role("role");

    match (action.as_deref(), role_id) {
        (Some("add"), Some(role_id)) => {
            ctx.store
                .create_auto_role(guild_id.get(), role_id.get())
                .await?;
            ctx.say(format!(
                "New members will now receive <@&{}>.",
                role_id.get()
            ))
            .await
        }
        (Some("remove"), Some(role_id)) => {
            let removed = ctx
                .store
                .delete_auto_role(guild_id.get(), role_id.get())
                .await?;
            if removed {
                ctx.say(format!("<@&{}> is no longer an auto role.", role_id.get()))
                    .await
            } else {
                ctx.say(format!("<@&{}> isn't an auto role.", role_id.get()))
                    .await
            }
        }
        (Some("list"), _) => {
            let roles = ctx.store.auto_roles(guild_id.get()).await?;
            if roles.is_empty() {
                return ctx.say("No auto roles configured.").await;
            }

            let description = roles
                .iter()
                .map(|role| format!("<@&{}>", role.role_id))
                .collect::<Vec<_>>()
                .join("\n");
            ctx.send_embed(ReplyEmbed::new("Auto roles", description).color(INFO_COLOR))
                .await
        }
        _ => ctx.usage().await,
    }
}
