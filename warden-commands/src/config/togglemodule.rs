use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::config::on_off;
use crate::context::CommandContext;
use warden_core::{Error, Param};
use warden_database::model::settings::SettingsUpdate;

pub const META: CommandMeta = CommandMeta {
    name: "togglemodule",
    desc: "Turn the leveling or economy system on or off.",
    category: "config",
    usage: "!togglemodule <levels|economy>",
    params: &[Param::word("module", "levels or economy")],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let module = ctx.args.string("module").map(str::to_lowercase);

    let settings = ctx.store.server_settings(guild_id.get()).await?;
    let (label, update) = match module.as_deref() {
        Some("levels" | "leveling") => (
            "Leveling",
            SettingsUpdate {
                level_system: Some(!settings.level_system),
                ..Default::default()
            },
        ),
        Some("economy") => (
            "Economy",
            SettingsUpdate {
                economy_system: Some(!settings.economy_system),
                ..Default::default()
            },
        ),
        _ => return ctx.usage().await,
    };

    let updated = ctx
        .store
        .update_server_settings(guild_id.get(), update)
        .await?;
    let enabled = if label == "Leveling" {
        updated.level_system
    } else {
        updated.economy_system
    };

    ctx.say(format!("{label}: {}.", on_off(enabled).to_lowercase()))
        .await
}
