//! Outbound operations against the chat platform.

mod discord;

use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use warden_utils::embed::Reply;

use crate::{Error, invocation::Invocation};

pub use discord::DiscordPlatform;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleSummary {
    pub id: serenity::RoleId,
    pub name: String,
    pub colour: u32,
    pub position: u16,
    pub mentionable: bool,
    pub hoist: bool,
    pub permissions: serenity::Permissions,
    pub created_at: i64,
    pub member_count: Option<usize>,
}

#[async_trait]
pub trait Platform: Send + Sync {
    /// Answer the invocation on its own surface.
    async fn reply(&self, invocation: &Invocation, reply: Reply) -> Result<(), Error>;

    /// Post a standalone message, optionally removing it after `delete_after`.
    async fn announce(
        &self,
        channel_id: serenity::ChannelId,
        reply: Reply,
        delete_after: Option<Duration>,
    ) -> Result<(), Error>;

    async fn member_permissions(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<serenity::Permissions, Error>;

    async fn member_roles(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<Vec<serenity::RoleId>, Error>;

    async fn ban(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        delete_message_days: u8,
        reason: &str,
    ) -> Result<(), Error>;

    async fn unban(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        reason: &str,
    ) -> Result<(), Error>;

    async fn kick(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        reason: &str,
    ) -> Result<(), Error>;

    /// Set a communication timeout ending at `until_unix`, or clear it with `None`.
    async fn timeout(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        until_unix: Option<u64>,
        reason: &str,
    ) -> Result<(), Error>;

    async fn add_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error>;

    async fn remove_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error>;

    /// Deny (or return to neutral) SEND_MESSAGES for `@everyone` in a channel.
    async fn set_channel_locked(
        &self,
        guild_id: serenity::GuildId,
        channel_id: serenity::ChannelId,
        locked: bool,
    ) -> Result<(), Error>;

    async fn set_slowmode(&self, channel_id: serenity::ChannelId, seconds: u16)
    -> Result<(), Error>;

    /// Delete up to `limit` recent messages and report how many went.
    async fn bulk_delete(&self, channel_id: serenity::ChannelId, limit: u8) -> Result<usize, Error>;

    async fn guild_roles(&self, guild_id: serenity::GuildId) -> Result<Vec<RoleSummary>, Error>;

    fn guild_count(&self) -> usize;
}
