use std::collections::HashMap;

use poise::serenity_prelude as serenity;

use crate::data::Data;
use warden_commands::DispatchOutcome;
use warden_core::invocation::split_prefix_command;
use warden_core::{Arguments, Invocation, OptionValue};
use warden_utils::COMMAND_PREFIX;

/// Run a prefix command if the message holds one. Returns whether a known
/// command was dispatched.
pub async fn handle_message(data: &Data, message: &serenity::Message) -> bool {
    if message.author.bot || message.webhook_id.is_some() {
        return false;
    }

    let Some(invocation) = prefix_invocation(message) else {
        return false;
    };

    data.dispatcher.dispatch(invocation).await != DispatchOutcome::Ignored
}

fn prefix_invocation(message: &serenity::Message) -> Option<Invocation> {
    let (command, tokens) = split_prefix_command(&message.content, COMMAND_PREFIX)?;
    let mut invocation = Invocation::prefix(
        command,
        message.channel_id,
        message.author.id,
        message.id,
        tokens,
    );

    if let Some(guild_id) = message.guild_id {
        invocation = invocation.in_guild(guild_id);
    }
    if let Some(member) = message.member.as_deref() {
        invocation = invocation.with_roles(member.roles.clone());
    }

    Some(invocation)
}

pub async fn handle_interaction(data: &Data, interaction: &serenity::Interaction) {
    let serenity::Interaction::Command(command) = interaction else {
        return;
    };

    let options: HashMap<String, OptionValue> = command
        .data
        .options
        .iter()
        .filter_map(|option| option_value(&option.value).map(|value| (option.name.clone(), value)))
        .collect();

    let mut invocation = Invocation::slash(
        command.data.name.clone(),
        command.channel_id,
        command.user.id,
        command.id,
        command.token.clone(),
        Arguments::Options(options),
    );

    if let Some(guild_id) = command.guild_id {
        invocation = invocation.in_guild(guild_id);
    }
    if let Some(member) = command.member.as_deref() {
        invocation = invocation.with_roles(member.roles.clone());
        if let Some(permissions) = member.permissions {
            invocation = invocation.with_permissions(permissions);
        }
    }

    data.dispatcher.dispatch(invocation).await;
}

/// Interaction option values we bind to parameters. Attachments and
/// subcommands are not used by any command.
pub fn option_value(value: &serenity::CommandDataOptionValue) -> Option<OptionValue> {
    match value {
        serenity::CommandDataOptionValue::User(id) => Some(OptionValue::User(*id)),
        serenity::CommandDataOptionValue::Role(id) => Some(OptionValue::Role(*id)),
        serenity::CommandDataOptionValue::Channel(id) => Some(OptionValue::Channel(*id)),
        serenity::CommandDataOptionValue::Integer(value) => Some(OptionValue::Integer(*value)),
        serenity::CommandDataOptionValue::String(value) => Some(OptionValue::String(value.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::option_value;
    use warden_core::OptionValue;

    #[test]
    fn converts_supported_option_values() {
        assert_eq!(
            option_value(&serenity::CommandDataOptionValue::User(serenity::UserId::new(4))),
            Some(OptionValue::User(serenity::UserId::new(4)))
        );
        assert_eq!(
            option_value(&serenity::CommandDataOptionValue::Integer(150)),
            Some(OptionValue::Integer(150))
        );
        assert_eq!(
            option_value(&serenity::CommandDataOptionValue::String("1h".to_owned())),
            Some(OptionValue::String("1h".to_owned()))
        );
        assert_eq!(
            option_value(&serenity::CommandDataOptionValue::Boolean(true)),
            None
        );
    }
}
