use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use tracing::debug;

use warden_utils::embed::Reply;
use warden_utils::permissions::combine_role_permissions;
use warden_utils::time::{SECS_PER_DAY, now_unix_secs};

use crate::{
    Error,
    invocation::{Invocation, Source},
    platform::{Platform, RoleSummary},
};

/// Bulk deletion refuses messages older than this.
const BULK_DELETE_MAX_AGE_SECS: u64 = 14 * SECS_PER_DAY;

/// [`Platform`] backed by serenity's REST client and gateway cache.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<serenity::Http>, cache: Arc<serenity::Cache>) -> Self {
        Self { http, cache }
    }

    fn http(&self) -> &serenity::Http {
        &self.http
    }
}

fn create_message(reply: &Reply) -> serenity::CreateMessage {
    let mut message = serenity::CreateMessage::new();
    if let Some(content) = reply.content.as_deref() {
        message = message.content(content);
    }
    if let Some(embed) = &reply.embed {
        message = message.embed(embed.to_create_embed());
    }
    message
}

fn interaction_message(reply: &Reply) -> serenity::CreateInteractionResponseMessage {
    let mut message = serenity::CreateInteractionResponseMessage::new().ephemeral(reply.ephemeral);
    if let Some(content) = reply.content.as_deref() {
        message = message.content(content);
    }
    if let Some(embed) = &reply.embed {
        message = message.embed(embed.to_create_embed());
    }
    message
}

fn followup_message(reply: &Reply) -> serenity::CreateInteractionResponseFollowup {
    let mut message = serenity::CreateInteractionResponseFollowup::new().ephemeral(reply.ephemeral);
    if let Some(content) = reply.content.as_deref() {
        message = message.content(content);
    }
    if let Some(embed) = &reply.embed {
        message = message.embed(embed.to_create_embed());
    }
    message
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn reply(&self, invocation: &Invocation, reply: Reply) -> Result<(), Error> {
        let already_replied = invocation.mark_replied();

        match &invocation.source {
            Source::Prefix { message_id } => {
                let message =
                    create_message(&reply).reference_message((invocation.channel_id, *message_id));
                invocation
                    .channel_id
                    .send_message(self.http(), message)
                    .await?;
            }
            Source::Slash {
                interaction_id,
                token,
            } => {
                if already_replied {
                    self.http
                        .create_followup_message(token, &followup_message(&reply), Vec::new())
                        .await?;
                } else {
                    let response = serenity::CreateInteractionResponse::Message(
                        interaction_message(&reply),
                    );
                    self.http
                        .create_interaction_response(*interaction_id, token, &response, Vec::new())
                        .await?;
                }
            }
        }

        Ok(())
    }

    async fn announce(
        &self,
        channel_id: serenity::ChannelId,
        reply: Reply,
        delete_after: Option<Duration>,
    ) -> Result<(), Error> {
        let message = channel_id
            .send_message(self.http(), create_message(&reply))
            .await?;

        if let Some(delay) = delete_after {
            let http = Arc::clone(&self.http);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if let Err(source) = http.delete_message(channel_id, message.id, None).await {
                    debug!(?source, "failed to remove temporary message");
                }
            });
        }

        Ok(())
    }

    async fn member_permissions(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<serenity::Permissions, Error> {
        let guild = guild_id.to_partial_guild(self.http()).await?;
        if guild.owner_id == user_id {
            return Ok(serenity::Permissions::all());
        }

        let member = guild_id.member(self.http(), user_id).await?;

        Ok(combine_role_permissions(
            guild_id,
            &member.roles,
            guild.roles.iter().map(|(id, role)| (id, role.permissions)),
        ))
    }

    async fn member_roles(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<Vec<serenity::RoleId>, Error> {
        let member = guild_id.member(self.http(), user_id).await?;
        Ok(member.roles)
    }

    async fn ban(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        delete_message_days: u8,
        reason: &str,
    ) -> Result<(), Error> {
        guild_id
            .ban_with_reason(self.http(), user_id, delete_message_days, reason)
            .await?;
        Ok(())
    }

    async fn unban(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        reason: &str,
    ) -> Result<(), Error> {
        self.http.remove_ban(guild_id, user_id, Some(reason)).await?;
        Ok(())
    }

    async fn kick(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        reason: &str,
    ) -> Result<(), Error> {
        guild_id
            .kick_with_reason(self.http(), user_id, reason)
            .await?;
        Ok(())
    }

    async fn timeout(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        until_unix: Option<u64>,
        reason: &str,
    ) -> Result<(), Error> {
        let edit = match until_unix {
            Some(until_unix) => {
                let until = serenity::Timestamp::from_unix_timestamp(i64::try_from(until_unix)?)?;
                serenity::EditMember::new().disable_communication_until_datetime(until)
            }
            None => serenity::EditMember::new().enable_communication(),
        };

        guild_id
            .edit_member(self.http(), user_id, edit.audit_log_reason(reason))
            .await?;
        Ok(())
    }

    async fn add_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn set_channel_locked(
        &self,
        guild_id: serenity::GuildId,
        channel_id: serenity::ChannelId,
        locked: bool,
    ) -> Result<(), Error> {
        let everyone = serenity::RoleId::new(guild_id.get());
        let channel = channel_id
            .to_channel(self.http())
            .await?
            .guild()
            .ok_or_else(|| anyhow::anyhow!("channel {channel_id} is not a guild channel"))?;

        let existing = channel.permission_overwrites.iter().find(|overwrite| {
            matches!(overwrite.kind, serenity::PermissionOverwriteType::Role(id) if id == everyone)
        });
        let mut allow = existing.map_or(serenity::Permissions::empty(), |o| o.allow);
        let mut deny = existing.map_or(serenity::Permissions::empty(), |o| o.deny);

        allow.remove(serenity::Permissions::SEND_MESSAGES);
        if locked {
            deny.insert(serenity::Permissions::SEND_MESSAGES);
        } else {
            deny.remove(serenity::Permissions::SEND_MESSAGES);
        }

        channel_id
            .create_permission(
                self.http(),
                serenity::PermissionOverwrite {
                    allow,
                    deny,
                    kind: serenity::PermissionOverwriteType::Role(everyone),
                },
            )
            .await?;
        Ok(())
    }

    async fn set_slowmode(
        &self,
        channel_id: serenity::ChannelId,
        seconds: u16,
    ) -> Result<(), Error> {
        channel_id
            .edit(
                self.http(),
                serenity::EditChannel::new().rate_limit_per_user(seconds),
            )
            .await?;
        Ok(())
    }

    async fn bulk_delete(&self, channel_id: serenity::ChannelId, limit: u8) -> Result<usize, Error> {
        let messages = channel_id
            .messages(self.http(), serenity::GetMessages::new().limit(limit))
            .await?;

        let oldest_allowed = now_unix_secs().saturating_sub(BULK_DELETE_MAX_AGE_SECS);
        let ids: Vec<serenity::MessageId> = messages
            .into_iter()
            .filter(|message| {
                u64::try_from(message.timestamp.unix_timestamp())
                    .is_ok_and(|sent_at| sent_at > oldest_allowed)
            })
            .map(|message| message.id)
            .collect();

        match ids.as_slice() {
            [] => {}
            [single] => channel_id.delete_message(self.http(), *single).await?,
            _ => channel_id.delete_messages(self.http(), ids.clone()).await?,
        }

        Ok(ids.len())
    }

    async fn guild_roles(&self, guild_id: serenity::GuildId) -> Result<Vec<RoleSummary>, Error> {
        let roles = guild_id.roles(self.http()).await?;

        let member_counts = self.cache.guild(guild_id).map(|guild| {
            let mut counts = std::collections::HashMap::<serenity::RoleId, usize>::new();
            for member in guild.members.values() {
                for role_id in &member.roles {
                    *counts.entry(*role_id).or_default() += 1;
                }
            }
            counts
        });

        let mut summaries: Vec<RoleSummary> = roles
            .into_values()
            .map(|role| RoleSummary {
                id: role.id,
                name: role.name.clone(),
                colour: role.colour.0,
                position: role.position,
                mentionable: role.mentionable,
                hoist: role.hoist,
                permissions: role.permissions,
                created_at: role.id.created_at().unix_timestamp(),
                member_count: member_counts
                    .as_ref()
                    .map(|counts| counts.get(&role.id).copied().unwrap_or_default()),
            })
            .collect();

        summaries.sort_by(|a, b| b.position.cmp(&a.position));
        Ok(summaries)
    }

    fn guild_count(&self) -> usize {
        self.cache.guild_count()
    }
}
