use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::{Error, Param};
use warden_database::model::settings::SettingsUpdate;

pub const META: CommandMeta = CommandMeta {
    name: "setmodrole",
    desc: "Allow a role to use moderator commands.",
    category: "config",
    usage: "!setmodrole <role>",
    params: &[Param::role("role", "The moderator role")],
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
    if settings.mod_roles.contains(&role_id.get()) {
        return ctx
            .say(format!("<@&{}> is already a moderator role.", role_id.get()))
            .await;
    }

    let mut mod_roles = settings.mod_roles;
    mod_roles.push(role_id.get());

    ctx.store
        .update_server_settings(
            guild_id.get(),
            SettingsUpdate {
                mod_roles: Some(mod_roles),
                ..Default::default()
            },
        )
        .await?;

    ctx.say(format!("<@&{}> is now a moderator role.", role_id.get()))
        .await
}
