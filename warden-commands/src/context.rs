use std::sync::Arc;
use std::time::Instant;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::registry::Registry;
use warden_core::{CommandArgs, Error, Invocation, Platform};
use warden_database::Store;
use warden_utils::embed::{Reply, ReplyEmbed, error_embed};

/// Everything a handler gets to work with.
pub struct CommandContext {
    pub invocation: Arc<Invocation>,
    pub args: CommandArgs,
    pub platform: Arc<dyn Platform>,
    pub store: Arc<dyn Store>,
    pub registry: Arc<Registry>,
    pub meta: CommandMeta,
    pub started_at: Instant,
}

impl CommandContext {
    pub fn author_id(&self) -> serenity::UserId {
        self.invocation.author_id
    }

    pub fn channel_id(&self) -> serenity::ChannelId {
        self.invocation.channel_id
    }

    /// The dispatcher rejects guild-only commands outside guilds, so this only
    /// fails when a handler is registered without the flag.
    pub fn guild_id(&self) -> Result<serenity::GuildId, Error> {
        self.invocation
            .guild_id
            .ok_or_else(|| anyhow::anyhow!("`{}` needs a guild", self.meta.name))
    }

    pub async fn reply(&self, reply: Reply) -> Result<(), Error> {
        self.platform.reply(&self.invocation, reply).await
    }

    pub async fn say(&self, text: impl Into<String>) -> Result<(), Error> {
        self.reply(Reply::text(text)).await
    }

    pub async fn send_embed(&self, embed: ReplyEmbed) -> Result<(), Error> {
        self.reply(Reply::embed(embed)).await
    }

    pub async fn error(&self, description: impl Into<String>) -> Result<(), Error> {
        self.reply(Reply::embed(error_embed(description))).await
    }

    pub async fn usage(&self) -> Result<(), Error> {
        self.say(format!("Usage: `{}`", self.meta.usage)).await
    }
}
