//! Slash command definitions built from the registry's parameter schemas.

use poise::serenity_prelude as serenity;
use tracing::info;

use warden_commands::{CommandMeta, Registry};
use warden_core::{Error, Param, ParamKind};

fn option_type(kind: ParamKind) -> serenity::CommandOptionType {
    match kind {
        ParamKind::User => serenity::CommandOptionType::User,
        ParamKind::Role => serenity::CommandOptionType::Role,
        ParamKind::Channel => serenity::CommandOptionType::Channel,
        ParamKind::Integer => serenity::CommandOptionType::Integer,
        ParamKind::Word | ParamKind::Text => serenity::CommandOptionType::String,
    }
}

/// Discord wants required options first. Slash arguments bind by name, so
/// reordering doesn't change what handlers see.
fn ordered_params(params: &[Param]) -> impl Iterator<Item = &Param> {
    params
        .iter()
        .filter(|param| param.required)
        .chain(params.iter().filter(|param| !param.required))
}

pub fn slash_command(meta: &CommandMeta) -> serenity::CreateCommand {
    let mut command = serenity::CreateCommand::new(meta.name).description(meta.desc);

    if let Some(permission) = meta.permission {
        command = command.default_member_permissions(permission);
    }
    if meta.guild_only {
        command = command.dm_permission(false);
    }

    for param in ordered_params(meta.params) {
        command = command.add_option(
            serenity::CreateCommandOption::new(
                option_type(param.kind),
                param.name,
                param.description,
            )
            .required(param.required),
        );
    }

    command
}

pub fn slash_commands(registry: &Registry) -> Vec<serenity::CreateCommand> {
    registry
        .sorted()
        .into_iter()
        .map(|command| slash_command(&command.meta))
        .collect()
}

/// Register every command in one guild, or globally when no guild is given.
pub async fn register(
    http: &serenity::Http,
    registry: &Registry,
    guild_id: Option<serenity::GuildId>,
) -> Result<(), Error> {
    let commands = slash_commands(registry);
    let count = commands.len();

    match guild_id {
        Some(guild_id) => {
            guild_id.set_commands(http, commands).await?;
            info!(count, guild_id = guild_id.get(), "registered guild slash commands");
        }
        None => {
            serenity::Command::set_global_commands(http, commands).await?;
            info!(count, "registered global slash commands");
        }
    }

    Ok(())
}
