#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use poise::serenity_prelude as serenity;

use warden_commands::{Dispatcher, registry};
use warden_core::testing::RecordingPlatform;
use warden_core::{Arguments, Invocation, OptionValue, Platform};
use warden_database::{MemoryStore, Store};

pub fn guild() -> serenity::GuildId {
    serenity::GuildId::new(100)
}

pub fn channel() -> serenity::ChannelId {
    serenity::ChannelId::new(200)
}

pub fn moderator() -> serenity::UserId {
    serenity::UserId::new(1)
}

pub fn target() -> serenity::UserId {
    serenity::UserId::new(2)
}

pub struct Harness {
    pub platform: Arc<RecordingPlatform>,
    pub store: Arc<MemoryStore>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    /// The moderator starts out as an administrator with no mod roles configured.
    pub fn new() -> Self {
        let platform = Arc::new(RecordingPlatform::new());
        let store = Arc::new(MemoryStore::new());
        platform.grant(moderator(), serenity::Permissions::ADMINISTRATOR);

        let dispatcher = Dispatcher::new(
            Arc::new(registry()),
            Arc::clone(&platform) as Arc<dyn Platform>,
            Arc::clone(&store) as Arc<dyn Store>,
        );

        Self {
            platform,
            store,
            dispatcher,
        }
    }

    pub fn reply_texts(&self) -> Vec<String> {
        self.platform.reply_texts()
    }

    pub fn last_reply(&self) -> String {
        self.platform.reply_texts().pop().unwrap_or_default()
    }
}

/// A guild prefix invocation from the moderator, e.g. `prefix("ban <@2> spam")`.
pub fn prefix(line: &str) -> Invocation {
    prefix_from(moderator(), line)
}

pub fn prefix_from(author: serenity::UserId, line: &str) -> Invocation {
    let mut tokens = line.split_whitespace().map(str::to_owned);
    let command = tokens.next().expect("command name");
    Invocation::prefix(
        command,
        channel(),
        author,
        serenity::MessageId::new(300),
        tokens.collect(),
    )
    .in_guild(guild())
}

pub fn slash(command: &str, options: Vec<(&str, OptionValue)>) -> Invocation {
    let options: HashMap<String, OptionValue> = options
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect();

    Invocation::slash(
        command,
        channel(),
        moderator(),
        serenity::InteractionId::new(400),
        "token",
        Arguments::Options(options),
    )
    .in_guild(guild())
}
