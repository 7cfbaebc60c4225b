//! Republishes audit log entries and message edits/deletes into the guild's
//! log channel. Independent of command dispatch; nothing here is retried.

use poise::serenity_prelude as serenity;
use serenity::model::guild::audit_log::{Action, MemberAction};
use tracing::{debug, error};

use warden_core::Platform;
use warden_database::Store;
use warden_utils::embed::{DEFAULT_EMBED_COLOR, ERROR_COLOR, NOTICE_COLOR, Reply, ReplyEmbed};
use warden_utils::formatting::escape_mentions;

/// Embed field values are capped at 1024 characters.
const MAX_FIELD_CHARS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirroredAction {
    Kick,
    Ban,
    Unban,
    MemberUpdate,
    MemberRoleUpdate,
}

impl MirroredAction {
    pub fn from_audit_action(action: &Action) -> Option<Self> {
        match action {
            Action::Member(MemberAction::Kick) => Some(Self::Kick),
            Action::Member(MemberAction::BanAdd) => Some(Self::Ban),
            Action::Member(MemberAction::BanRemove) => Some(Self::Unban),
            Action::Member(MemberAction::Update) => Some(Self::MemberUpdate),
            Action::Member(MemberAction::RoleUpdate) => Some(Self::MemberRoleUpdate),
            _ => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Kick => "Member kicked",
            Self::Ban => "Member banned",
            Self::Unban => "Member unbanned",
            Self::MemberUpdate => "Member updated",
            Self::MemberRoleUpdate => "Member roles updated",
        }
    }

    fn color(self) -> u32 {
        match self {
            Self::Kick | Self::Ban => ERROR_COLOR,
            Self::Unban | Self::MemberUpdate | Self::MemberRoleUpdate => NOTICE_COLOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuditEvent {
    Moderation {
        action: MirroredAction,
        target_id: Option<u64>,
        executor_id: u64,
        reason: Option<String>,
    },
    MessageEdited {
        author_id: u64,
        channel_id: u64,
        before: Option<String>,
        after: String,
    },
    MessageDeleted {
        author_id: Option<u64>,
        channel_id: u64,
        content: Option<String>,
    },
}

impl AuditEvent {
    pub fn from_audit_entry(entry: &serenity::AuditLogEntry) -> Option<Self> {
        let action = MirroredAction::from_audit_action(&entry.action)?;
        Some(Self::Moderation {
            action,
            target_id: entry.target_id.map(|id| id.get()),
            executor_id: entry.user_id.get(),
            reason: entry.reason.clone(),
        })
    }

    /// Edits qualify when the content changed and the author isn't a bot.
    /// Updates without content (embed unfurls) are skipped.
    pub fn message_edit(
        author: Option<(u64, bool)>,
        channel_id: u64,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Option<Self> {
        let (author_id, is_bot) = author?;
        let after = after?;
        if is_bot || before == Some(after) {
            return None;
        }

        Some(Self::MessageEdited {
            author_id,
            channel_id,
            before: before.map(str::to_owned),
            after: after.to_owned(),
        })
    }

    /// `cached` is `(author_id, author_is_bot, content)` when the message was
    /// still in the cache.
    pub fn message_delete(channel_id: u64, cached: Option<(u64, bool, String)>) -> Option<Self> {
        match cached {
            Some((_, true, _)) => None,
            Some((author_id, false, content)) => Some(Self::MessageDeleted {
                author_id: Some(author_id),
                channel_id,
                content: Some(content),
            }),
            None => Some(Self::MessageDeleted {
                author_id: None,
                channel_id,
                content: None,
            }),
        }
    }

    pub fn describe(&self) -> ReplyEmbed {
        match self {
            Self::Moderation {
                action,
                target_id,
                executor_id,
                reason,
            } => {
                let target = mention_or_unknown(*target_id);
                let moderator = format!("<@{executor_id}>");
                let reason = reason
                    .as_deref()
                    .map(escape_mentions)
                    .unwrap_or_else(|| "No reason provided".to_owned());

                let description = [
                    format!("**Target :** {target}"),
                    format!("**Moderator :** {moderator}"),
                    format!("**Reason :** {reason}"),
                ]
                .join("\n");

                ReplyEmbed::new(action.title(), description)
                    .color(action.color())
                    .timestamp()
            }
            Self::MessageEdited {
                author_id,
                channel_id,
                before,
                after,
            } => ReplyEmbed::new(
                "Message edited",
                format!("<@{author_id}> edited a message in <#{channel_id}>."),
            )
            .color(DEFAULT_EMBED_COLOR)
            .field(
                "Before",
                before
                    .as_deref()
                    .map(field_text)
                    .unwrap_or_else(|| "*Not cached*".to_owned()),
                false,
            )
            .field("After", field_text(after), false)
            .timestamp(),
            Self::MessageDeleted {
                author_id,
                channel_id,
                content,
            } => {
                let description = match author_id {
                    Some(author_id) => {
                        format!("A message by <@{author_id}> was deleted in <#{channel_id}>.")
                    }
                    None => format!("A message was deleted in <#{channel_id}>."),
                };

                ReplyEmbed::new("Message deleted", description)
                    .color(ERROR_COLOR)
                    .field(
                        "Content",
                        content
                            .as_deref()
                            .map(field_text)
                            .unwrap_or_else(|| "*Not cached*".to_owned()),
                        false,
                    )
                    .timestamp()
            }
        }
    }
}

fn mention_or_unknown(user_id: Option<u64>) -> String {
    user_id
        .map(|id| format!("<@{id}>"))
        .unwrap_or_else(|| "Unknown".to_owned())
}

fn field_text(raw: &str) -> String {
    if raw.is_empty() {
        return "*Empty*".to_owned();
    }

    let escaped = escape_mentions(raw);
    if escaped.chars().count() <= MAX_FIELD_CHARS {
        return escaped;
    }

    let mut truncated: String = escaped.chars().take(MAX_FIELD_CHARS - 1).collect();
    truncated.push('…');
    truncated
}

/// Send one event to the guild's log channel, if it has one.
pub async fn publish(
    platform: &dyn Platform,
    store: &dyn Store,
    guild_id: serenity::GuildId,
    event: &AuditEvent,
) {
    let settings = match store.server_settings(guild_id.get()).await {
        Ok(settings) => settings,
        Err(source) => {
            error!(?source, guild_id = guild_id.get(), "failed to read log channel setting");
            return;
        }
    };

    let Some(channel_id) = settings.log_channel_id else {
        return;
    };

    if let Err(source) = platform
        .announce(
            serenity::ChannelId::new(channel_id),
            Reply::embed(event.describe()),
            None,
        )
        .await
    {
        debug!(?source, guild_id = guild_id.get(), "failed to mirror audit event");
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;
    use serenity::model::guild::audit_log::{Action, ChannelAction, MemberAction};

    use super::{AuditEvent, MirroredAction, publish};
    use warden_core::testing::RecordingPlatform;
    use warden_database::MemoryStore;
    use warden_database::model::settings::ServerSettings;

    #[test]
    fn only_member_actions_are_mirrored() {
        assert_eq!(
            MirroredAction::from_audit_action(&Action::Member(MemberAction::Kick)),
            Some(MirroredAction::Kick)
        );
        assert_eq!(
            MirroredAction::from_audit_action(&Action::Member(MemberAction::RoleUpdate)),
            Some(MirroredAction::MemberRoleUpdate)
        );
        assert_eq!(
            MirroredAction::from_audit_action(&Action::Channel(ChannelAction::Create)),
            None
        );
    }

    #[test]
    fn audit_entries_carry_target_and_executor() {
        let entry: serenity::AuditLogEntry = serde_json::from_value(serde_json::json!({
            "action_type": 22,
            "id": "900",
            "user_id": "1",
            "target_id": "2",
            "reason": "raiding",
        }))
        .expect("audit entry");

        assert_eq!(
            AuditEvent::from_audit_entry(&entry),
            Some(AuditEvent::Moderation {
                action: MirroredAction::Ban,
                target_id: Some(2),
                executor_id: 1,
                reason: Some("raiding".to_owned()),
            })
        );

        let channel_entry: serenity::AuditLogEntry = serde_json::from_value(serde_json::json!({
            "action_type": 10,
            "id": "901",
            "user_id": "1",
            "target_id": "3",
        }))
        .expect("audit entry");
        assert_eq!(AuditEvent::from_audit_entry(&channel_entry), None);
    }

    #[test]
    fn unchanged_or_bot_edits_are_skipped() {
        assert_eq!(
            AuditEvent::message_edit(Some((1, false)), 2, Some("same"), Some("same")),
            None
        );
        assert_eq!(
            AuditEvent::message_edit(Some((1, true)), 2, Some("old"), Some("new")),
            None
        );
        assert_eq!(AuditEvent::message_edit(Some((1, false)), 2, Some("old"), None), None);
        assert!(AuditEvent::message_edit(Some((1, false)), 2, None, Some("new")).is_some());
    }

    #[test]
    fn deleted_messages_fall_back_without_cache() {
        let event = AuditEvent::message_delete(5, None).expect("event");
        let embed = event.describe();
        assert_eq!(embed.description, "A message was deleted in <#5>.");
        assert!(embed.fields.iter().any(|field| field.value == "*Not cached*"));

        assert_eq!(
            AuditEvent::message_delete(5, Some((1, true, "beep".to_owned()))),
            None
        );
    }

    #[test]
    fn moderation_embeds_escape_reasons() {
        let event = AuditEvent::Moderation {
            action: MirroredAction::Ban,
            target_id: Some(2),
            executor_id: 1,
            reason: Some("@everyone spam".to_owned()),
        };
        let embed = event.describe();
        assert_eq!(embed.title, "Member banned");
        assert!(embed.description.contains("**Target :** <@2>"));
        assert!(embed.description.contains("**Moderator :** <@1>"));
        assert!(embed.description.contains("@\u{200B}everyone spam"));
    }

    #[test]
    fn long_content_is_truncated() {
        let event = AuditEvent::MessageEdited {
            author_id: 1,
            channel_id: 2,
            before: None,
            after: "x".repeat(5000),
        };
        let embed = event.describe();
        let after = embed
            .fields
            .iter()
            .find(|field| field.name == "After")
            .expect("after field");
        assert_eq!(after.value.chars().count(), 1024);
        assert!(after.value.ends_with('…'));
    }

    #[tokio::test]
    async fn publishes_only_with_a_log_channel() {
        let platform = RecordingPlatform::new();
        let store = MemoryStore::new();
        let guild_id = serenity::GuildId::new(10);
        let event = AuditEvent::message_delete(5, None).expect("event");

        publish(&platform, &store, guild_id, &event).await;
        assert!(platform.announcements().is_empty());

        let mut settings = ServerSettings::defaults(guild_id.get());
        settings.log_channel_id = Some(99);
        store.set_server_settings(settings);

        publish(&platform, &store, guild_id, &event).await;
        let announcements = platform.announcements();
        assert_eq!(announcements.len(), 1);
        assert_eq!(announcements[0].channel_id, serenity::ChannelId::new(99));
        assert_eq!(announcements[0].delete_after, None);
    }

    #[tokio::test]
    async fn send_failures_are_swallowed() {
        let platform = RecordingPlatform::new();
        platform.fail_on("announce");
        let store = MemoryStore::new();
        let guild_id = serenity::GuildId::new(10);
        let mut settings = ServerSettings::defaults(guild_id.get());
        settings.log_channel_id = Some(99);
        store.set_server_settings(settings);

        let event = AuditEvent::message_delete(5, None).expect("event");
        publish(&platform, &store, guild_id, &event).await;

        assert!(platform.announcements().is_empty());
    }
}
