use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::Error;
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "listmodroles",
    desc: "List the roles allowed to use moderator commands.",
    category: "config",
    usage: "!listmodroles",
    params: &[],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let settings = ctx.store.server_settings(guild_id.get()).await?;

    if settings.mod_roles.is_empty() {
        return ctx
            .say("No moderator roles are set, so permission checks alone decide who can moderate.")
            .await;
    }

    let description = settings
        .mod_roles
        .iter()
        .map(|role_id| format!("<@&{role_id}>"))
        .collect::<Vec<_>>()
        .join("\n");

    ctx.send_embed(ReplyEmbed::new("Moderator roles", description).color(INFO_COLOR))
        .await
}
