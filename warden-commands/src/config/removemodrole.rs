use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::{Error, Param};
use warden_database::model::settings::SettingsUpdate;

pub const META: CommandMeta = CommandMeta {
    name: "removemodrole",
    desc: "Stop a role from using moderator commands.",
    category: "config",
    usage: "!removemodrole <role>",
    params: &[Param::role("role", "The moderator role to remove")],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(role_id) = ctx.args.role("role") else {
        return ctx.usage().await;
    };

    let settings = ctx.store.server_settings(guild_id.get()).await?;
    if !settings.mod_roles.contains(&role_id.get()) {
        return ctx
            .say(format!("<@&{}> isn't a moderator role.", role_id.get()))
            .await;
    }

    let mod_roles = settings
        .mod_roles
        .into_iter()
        .filter(|id| *id != role_id.get())
        .collect();

    ctx.store
        .update_server_settings(
            guild_id.get(),
            SettingsUpdate {
                mod_roles: Some(mod_roles),
                ..Default::default()
            },
        )
        .await?;

    ctx.say(format!(
        "<@&{}> is no longer a moderator role.",
        role_id.get()
    ))
    .await
}
