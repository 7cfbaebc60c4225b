use poise::serenity_prelude as serenity;

use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};
use warden_utils::formatting::escape_mentions;

pub const DEFAULT_REASON: &str = "No reason provided";

pub const NOT_RECORDED_FOOTER: &str =
    "Action completed, but it could not be recorded in the moderation log.";

/// Success embed for a completed moderation action.
pub fn moderation_action_embed(
    target_user_id: serenity::UserId,
    action_past_tense: &str,
    reason: &str,
    extra: Option<(&str, String)>,
) -> ReplyEmbed {
    let mut embed = ReplyEmbed::new(
        format!("Member {action_past_tense}"),
        format!("<@{}> has been {}.", target_user_id.get(), action_past_tense),
    )
    .color(SUCCESS_COLOR)
    .field("Member", format!("<@{}>", target_user_id.get()), true)
    .field("Reason", escape_mentions(reason), true);

    if let Some((name, value)) = extra {
        embed = embed.field(name, value, true);
    }

    embed.timestamp()
}

/// Attach the "not recorded" footer when the record write failed.
pub fn with_record_status(embed: ReplyEmbed, recorded: bool) -> ReplyEmbed {
    if recorded {
        embed
    } else {
        embed.footer(NOT_RECORDED_FOOTER)
    }
}

pub fn platform_failure_message(verb: &str) -> String {
    format!("Failed to {verb}. Check my permissions and role hierarchy.")
}

pub fn moderation_self_action_message(action: &str) -> String {
    format!("You can't {action} yourself.")
}

pub fn is_missing_permissions_error(source: &anyhow::Error) -> bool {
    matches!(
        source.downcast_ref::<serenity::Error>(),
        Some(serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)))
            if response.status_code.as_u16() == 403 || response.error.code == 50013
    )
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::{NOT_RECORDED_FOOTER, moderation_action_embed, with_record_status};

    #[test]
    fn action_embed_escapes_reason() {
        let embed = moderation_action_embed(serenity::UserId::new(5), "banned", "@everyone", None);
        assert_eq!(embed.title, "Member banned");
        assert!(embed.fields.iter().any(|field| field.value == "@\u{200B}everyone"));
        assert!(embed.footer.is_none());
    }

    #[test]
    fn unrecorded_actions_get_a_footer() {
        let embed = moderation_action_embed(serenity::UserId::new(5), "kicked", "spam", None);
        let embed = with_record_status(embed, false);
        assert_eq!(embed.footer.as_deref(), Some(NOT_RECORDED_FOOTER));
    }
}
