use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::{Error, Param};
use warden_database::model::roles::NewReactionRole;
use warden_utils::parse::parse_snowflake;

pub const META: CommandMeta = CommandMeta {
    name: "reactionrole",
    desc: "Bind a reaction on a message in this channel to a role.",
    category: "roles",
    usage: "!reactionrole <add|remove> <message_id> <emoji> [role]",
    params: &[
        Param::word("action", "add or remove"),
        Param::word("message_id", "The message to watch"),
        Param::word("emoji", "The reaction emoji"),
        Param::role("role", "The role to grant").optional(),
    ],
    permission: Some(serenity::Permissions::MANAGE_ROLES),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let action = ctx.args.string("action").map(str::to_lowercase);
    let message_id = ctx.args.string("message_id").and_then(parse_snowflake);
    let emoji = ctx.args.string("emoji");

    let (Some(action), Some(message_id), Some(emoji)) = (action.as_deref(), message_id, emoji)
    else {
        return ctx.usage().await;
    };

    match action {
        "add" => {
            let Some(role_id) = ctx.args.role("role") else {
                return ctx.usage().await;
            };

            ctx.store
                .create_reaction_role(NewReactionRole {
                    guild_id: guild_id.get(),
                    channel_id: ctx.channel_id().get(),
                    message_id,
                    role_id: role_id.get(),
                    emoji: emoji.to_owned(),
                })
                .await?;
            ctx.say(format!(
                "Reacting with {} on message `{}` now grants <@&{}>.",
                emoji,
                message_id,
                role_id.get()
            ))
            .await
        }
        "remove" => {
            let removed = ctx
                .store
                .delete_reaction_role(guild_id.get(), message_id, emoji)
                .await?;
            if removed {
                ctx.say(format!("Removed the {emoji} reaction role from `{message_id}`."))
                    .await
            } else {
                ctx.say("No reaction role matches that message and emoji.")
                    .await
            }
        }
        _ => ctx.usage().await,
    }
}
