//! A [`Platform`] that records every call instead of talking to Discord.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use warden_utils::embed::Reply;

use crate::{
    Error,
    invocation::Invocation,
    platform::{Platform, RoleSummary},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformCall {
    Ban {
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        delete_message_days: u8,
        reason: String,
    },
    Unban {
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    },
    Kick {
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    },
    Timeout {
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        until_unix: Option<u64>,
    },
    AddRole {
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
    },
    RemoveRole {
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
    },
    SetChannelLocked {
        channel_id: serenity::ChannelId,
        locked: bool,
    },
    SetSlowmode {
        channel_id: serenity::ChannelId,
        seconds: u16,
    },
    BulkDelete {
        channel_id: serenity::ChannelId,
        limit: u8,
    },
}

impl PlatformCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ban { .. } => "ban",
            Self::Unban { .. } => "unban",
            Self::Kick { .. } => "kick",
            Self::Timeout { .. } => "timeout",
            Self::AddRole { .. } => "add_role",
            Self::RemoveRole { .. } => "remove_role",
            Self::SetChannelLocked { .. } => "set_channel_locked",
            Self::SetSlowmode { .. } => "set_slowmode",
            Self::BulkDelete { .. } => "bulk_delete",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub channel_id: serenity::ChannelId,
    pub reply: Reply,
    pub delete_after: Option<Duration>,
}

pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    replies: Mutex<Vec<Reply>>,
    announcements: Mutex<Vec<Announcement>>,
    failing: Mutex<HashSet<&'static str>>,
    permissions: Mutex<HashMap<serenity::UserId, serenity::Permissions>>,
    roles: Mutex<HashMap<serenity::UserId, Vec<serenity::RoleId>>>,
    guild_roles: Mutex<Vec<RoleSummary>>,
    available_messages: AtomicUsize,
    guild_count: AtomicUsize,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self {
            calls: Mutex::default(),
            replies: Mutex::default(),
            announcements: Mutex::default(),
            failing: Mutex::default(),
            permissions: Mutex::default(),
            roles: Mutex::default(),
            guild_roles: Mutex::default(),
            available_messages: AtomicUsize::new(200),
            guild_count: AtomicUsize::new(1),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named operation (see [`PlatformCall::name`], plus `reply`,
    /// `announce`, `member_permissions`, `member_roles`, `guild_roles`) fail.
    pub fn fail_on(&self, operation: &'static str) {
        lock(&self.failing).insert(operation);
    }

    pub fn grant(&self, user_id: serenity::UserId, permissions: serenity::Permissions) {
        lock(&self.permissions).insert(user_id, permissions);
    }

    pub fn set_member_roles(&self, user_id: serenity::UserId, roles: Vec<serenity::RoleId>) {
        lock(&self.roles).insert(user_id, roles);
    }

    pub fn set_guild_roles(&self, roles: Vec<RoleSummary>) {
        *lock(&self.guild_roles) = roles;
    }

    pub fn set_available_messages(&self, count: usize) {
        self.available_messages.store(count, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        lock(&self.calls).clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        lock(&self.calls).iter().map(PlatformCall::name).collect()
    }

    pub fn replies(&self) -> Vec<Reply> {
        lock(&self.replies).clone()
    }

    pub fn reply_texts(&self) -> Vec<String> {
        lock(&self.replies).iter().map(Reply::plain_text).collect()
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        lock(&self.announcements).clone()
    }

    fn check(&self, operation: &'static str) -> Result<(), Error> {
        if lock(&self.failing).contains(operation) {
            anyhow::bail!("simulated {operation} failure");
        }
        Ok(())
    }

    fn record(&self, call: PlatformCall) -> Result<(), Error> {
        self.check(call.name())?;
        lock(&self.calls).push(call);
        Ok(())
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn reply(&self, invocation: &Invocation, reply: Reply) -> Result<(), Error> {
        self.check("reply")?;
        invocation.mark_replied();
        lock(&self.replies).push(reply);
        Ok(())
    }

    async fn announce(
        &self,
        channel_id: serenity::ChannelId,
        reply: Reply,
        delete_after: Option<Duration>,
    ) -> Result<(), Error> {
        self.check("announce")?;
        lock(&self.announcements).push(Announcement {
            channel_id,
            reply,
            delete_after,
        });
        Ok(())
    }

    async fn member_permissions(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<serenity::Permissions, Error> {
        self.check("member_permissions")?;
        Ok(lock(&self.permissions)
            .get(&user_id)
            .copied()
            .unwrap_or_else(serenity::Permissions::empty))
    }

    async fn member_roles(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<Vec<serenity::RoleId>, Error> {
        self.check("member_roles")?;
        Ok(lock(&self.roles).get(&user_id).cloned().unwrap_or_default())
    }

    async fn ban(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        delete_message_days: u8,
        reason: &str,
    ) -> Result<(), Error> {
        self.record(PlatformCall::Ban {
            guild_id,
            user_id,
            delete_message_days,
            reason: reason.to_owned(),
        })
    }

    async fn unban(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        _reason: &str,
    ) -> Result<(), Error> {
        self.record(PlatformCall::Unban { guild_id, user_id })
    }

    async fn kick(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        _reason: &str,
    ) -> Result<(), Error> {
        self.record(PlatformCall::Kick { guild_id, user_id })
    }

    async fn timeout(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        until_unix: Option<u64>,
        _reason: &str,
    ) -> Result<(), Error> {
        self.record(PlatformCall::Timeout {
            guild_id,
            user_id,
            until_unix,
        })
    }

    async fn add_role(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        _reason: &str,
    ) -> Result<(), Error> {
        self.record(PlatformCall::AddRole { user_id, role_id })
    }

    async fn remove_role(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        _reason: &str,
    ) -> Result<(), Error> {
        self.record(PlatformCall::RemoveRole { user_id, role_id })
    }

    async fn set_channel_locked(
        &self,
        _guild_id: serenity::GuildId,
        channel_id: serenity::ChannelId,
        locked: bool,
    ) -> Result<(), Error> {
        self.record(PlatformCall::SetChannelLocked { channel_id, locked })
    }

    async fn set_slowmode(
        &self,
        channel_id: serenity::ChannelId,
        seconds: u16,
    ) -> Result<(), Error> {
        self.record(PlatformCall::SetSlowmode {
            channel_id,
            seconds,
        })
    }

    async fn bulk_delete(&self, channel_id: serenity::ChannelId, limit: u8) -> Result<usize, Error> {
        self.record(PlatformCall::BulkDelete { channel_id, limit })?;

        let available = self.available_messages.load(Ordering::SeqCst);
        let deleted = available.min(usize::from(limit));
        self.available_messages
            .store(available - deleted, Ordering::SeqCst);
        Ok(deleted)
    }

    async fn guild_roles(&self, _guild_id: serenity::GuildId) -> Result<Vec<RoleSummary>, Error> {
        self.check("guild_roles")?;
        Ok(lock(&self.guild_roles).clone())
    }

    fn guild_count(&self) -> usize {
        self.guild_count.load(Ordering::SeqCst)
    }
}
