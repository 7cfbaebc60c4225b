use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::config::on_off;
use crate::context::CommandContext;
use warden_core::Error;
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "settings",
    desc: "Show this server's bot settings.",
    category: "config",
    usage: "!settings",
    params: &[],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let settings = ctx.store.server_settings(guild_id.get()).await?;

    let mod_roles = if settings.mod_roles.is_empty() {
        "None".to_owned()
    } else {
        settings
            .mod_roles
            .iter()
            .map(|role_id| format!("<@&{role_id}>"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let log_channel = settings
        .log_channel_id
        .map(|channel_id| format!("<#{channel_id}>"))
        .unwrap_or_else(|| "None".to_owned());

    let embed = ReplyEmbed::new("Server settings", "")
        .color(INFO_COLOR)
        .field("Moderator roles", mod_roles, false)
        .field("Log channel", log_channel, true)
        .field("Leveling", on_off(settings.level_system), true)
        .field("Economy", on_off(settings.economy_system), true);

    ctx.send_embed(embed).await
}
