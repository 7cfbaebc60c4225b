//! Parameter schemas and argument normalization.
//!
//! A command declares its parameters once. The schema is used to register the
//! slash command and to bind whitespace tokens from prefix messages, so both
//! surfaces hand handlers the same [`CommandArgs`].

use std::collections::HashMap;

use poise::serenity_prelude as serenity;

use warden_utils::parse::{parse_channel_mention, parse_role_mention, parse_user_mention};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    User,
    Role,
    Channel,
    Integer,
    /// A single token.
    Word,
    /// The rest of the line.
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl Param {
    const fn new(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
        }
    }

    pub const fn user(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::User)
    }

    pub const fn role(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::Role)
    }

    pub const fn channel(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::Channel)
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::Integer)
    }

    pub const fn word(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::Word)
    }

    pub const fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::Text)
    }

    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    User(serenity::UserId),
    Role(serenity::RoleId),
    Channel(serenity::ChannelId),
    Integer(i64),
    String(String),
}

/// Raw arguments as they arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arguments {
    Positional(Vec<String>),
    Options(HashMap<String, OptionValue>),
}

/// Arguments bound to a command's parameter names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandArgs {
    values: HashMap<String, OptionValue>,
}

impl CommandArgs {
    pub fn resolve(params: &[Param], arguments: &Arguments) -> Self {
        match arguments {
            Arguments::Positional(tokens) => Self::bind_positional(params, tokens),
            Arguments::Options(options) => Self {
                values: params
                    .iter()
                    .filter_map(|param| {
                        options
                            .get(param.name)
                            .map(|value| (param.name.to_owned(), value.clone()))
                    })
                    .collect(),
            },
        }
    }

    /// A token that doesn't parse as the current param's kind leaves that
    /// param empty and is offered to the next one.
    fn bind_positional(params: &[Param], tokens: &[String]) -> Self {
        let mut values = HashMap::new();
        let mut cursor = 0;

        for param in params {
            if param.kind == ParamKind::Text {
                if cursor < tokens.len() {
                    values.insert(
                        param.name.to_owned(),
                        OptionValue::String(tokens[cursor..].join(" ")),
                    );
                    cursor = tokens.len();
                }
                continue;
            }

            let Some(token) = tokens.get(cursor) else {
                break;
            };

            if let Some(value) = parse_token(param.kind, token) {
                values.insert(param.name.to_owned(), value);
                cursor += 1;
            }
        }

        Self { values }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    pub fn user(&self, name: &str) -> Option<serenity::UserId> {
        match self.values.get(name)? {
            OptionValue::User(id) => Some(*id),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<serenity::RoleId> {
        match self.values.get(name)? {
            OptionValue::Role(id) => Some(*id),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<serenity::ChannelId> {
        match self.values.get(name)? {
            OptionValue::Channel(id) => Some(*id),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name)? {
            OptionValue::Integer(value) => Some(*value),
            OptionValue::String(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            OptionValue::String(value) => Some(value.as_str()).filter(|value| !value.is_empty()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_token(kind: ParamKind, token: &str) -> Option<OptionValue> {
    match kind {
        ParamKind::User => parse_user_mention(token)
            .map(|id| OptionValue::User(serenity::UserId::new(id))),
        ParamKind::Role => parse_role_mention(token)
            .map(|id| OptionValue::Role(serenity::RoleId::new(id))),
        ParamKind::Channel => parse_channel_mention(token)
            .map(|id| OptionValue::Channel(serenity::ChannelId::new(id))),
        ParamKind::Integer => token.parse::<i64>().ok().map(OptionValue::Integer),
        ParamKind::Word | ParamKind::Text => Some(OptionValue::String(token.to_owned())),
    }
}
