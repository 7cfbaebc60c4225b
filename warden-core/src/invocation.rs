use std::sync::atomic::{AtomicBool, Ordering};

use poise::serenity_prelude as serenity;

use crate::args::Arguments;

/// Where an invocation came from, with what is needed to answer it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Prefix {
        message_id: serenity::MessageId,
    },
    Slash {
        interaction_id: serenity::InteractionId,
        token: String,
    },
}

/// A request to run one named command, independent of the surface it came in on.
#[derive(Debug)]
pub struct Invocation {
    pub command: String,
    pub guild_id: Option<serenity::GuildId>,
    pub channel_id: serenity::ChannelId,
    pub author_id: serenity::UserId,
    pub author_roles: Vec<serenity::RoleId>,
    /// Set when the platform hands us resolved permissions (interactions do).
    pub author_permissions: Option<serenity::Permissions>,
    pub source: Source,
    pub arguments: Arguments,
    replied: AtomicBool,
}

impl Invocation {
    pub fn prefix(
        command: impl Into<String>,
        channel_id: serenity::ChannelId,
        author_id: serenity::UserId,
        message_id: serenity::MessageId,
        tokens: Vec<String>,
    ) -> Self {
        Self {
            command: command.into(),
            guild_id: None,
            channel_id,
            author_id,
            author_roles: Vec::new(),
            author_permissions: None,
            source: Source::Prefix { message_id },
            arguments: Arguments::Positional(tokens),
            replied: AtomicBool::new(false),
        }
    }

    pub fn slash(
        command: impl Into<String>,
        channel_id: serenity::ChannelId,
        author_id: serenity::UserId,
        interaction_id: serenity::InteractionId,
        token: impl Into<String>,
        arguments: Arguments,
    ) -> Self {
        Self {
            command: command.into(),
            guild_id: None,
            channel_id,
            author_id,
            author_roles: Vec::new(),
            author_permissions: None,
            source: Source::Slash {
                interaction_id,
                token: token.into(),
            },
            arguments,
            replied: AtomicBool::new(false),
        }
    }

    pub fn in_guild(mut self, guild_id: serenity::GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn with_roles(mut self, roles: Vec<serenity::RoleId>) -> Self {
        self.author_roles = roles;
        self
    }

    pub fn with_permissions(mut self, permissions: serenity::Permissions) -> Self {
        self.author_permissions = Some(permissions);
        self
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self.source, Source::Prefix { .. })
    }

    /// Flag the invocation as answered. Returns whether it already was.
    pub fn mark_replied(&self) -> bool {
        self.replied.swap(true, Ordering::SeqCst)
    }
}

/// Split a prefixed message into a lower-cased command name and its
/// whitespace-separated arguments.
pub fn split_prefix_command(content: &str, prefix: char) -> Option<(String, Vec<String>)> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let command = tokens.next()?.to_lowercase();
    Some((command, tokens.map(str::to_owned).collect()))
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::{Invocation, split_prefix_command};

    #[test]
    fn splits_prefixed_messages() {
        assert_eq!(
            split_prefix_command("!BAN <@1>  being rude", '!'),
            Some((
                "ban".to_owned(),
                vec!["<@1>".to_owned(), "being".to_owned(), "rude".to_owned()]
            ))
        );
        assert_eq!(split_prefix_command("hello !ban", '!'), None);
        assert_eq!(split_prefix_command("!", '!'), None);
        assert_eq!(split_prefix_command("!   ", '!'), None);
    }

    #[test]
    fn second_reply_is_detected() {
        let invocation = Invocation::prefix(
            "ping",
            serenity::ChannelId::new(1),
            serenity::UserId::new(2),
            serenity::MessageId::new(3),
            Vec::new(),
        );

        assert!(invocation.is_prefix());
        assert!(!invocation.mark_replied());
        assert!(invocation.mark_replied());
    }
}
