use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::{Error, Param};
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};
use warden_utils::formatting::{escape_mentions, relative_timestamp};

pub const META: CommandMeta = CommandMeta {
    name: "warnings",
    desc: "Show a member's warnings.",
    category: "moderation",
    usage: "!warnings <user>",
    params: &[Param::user("user", "The member to look up")],
    permission: None,
    mod_only: false,
    guild_only: true,
};

const SHOWN_WARNINGS: usize = 10;

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(user_id) = ctx.args.user("user") else {
        return ctx.usage().await;
    };

    let warnings = ctx.store.warnings(guild_id.get(), user_id.get()).await?;
    let mutes = ctx.store.mutes(guild_id.get(), user_id.get()).await?;

    ctx.send_embed(warnings_embed(user_id, &warnings, mutes.len()))
        .await
}

fn warnings_embed(
    user_id: serenity::UserId,
    warnings: &[warden_database::model::moderation::Warning],
    mute_count: usize,
) -> ReplyEmbed {
    let description = if warnings.is_empty() {
        format!("<@{}> has no warnings.", user_id.get())
    } else {
        warnings
            .iter()
            .rev()
            .take(SHOWN_WARNINGS)
            .map(|warning| {
                format!(
                    "`#{}` {} by <@{}>: {}",
                    warning.id,
                    relative_timestamp(warning.created_at),
                    warning.moderator_id,
                    escape_mentions(&warning.reason)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    ReplyEmbed::new(format!("Warnings for user {}", user_id.get()), description)
        .color(INFO_COLOR)
        .field("Warnings", warnings.len().to_string(), true)
        .field("Mutes", mute_count.to_string(), true)
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::warnings_embed;
    use warden_database::model::moderation::Warning;

    #[test]
    fn lists_newest_first() {
        let warnings: Vec<Warning> = (1..=3)
            .map(|id| Warning {
                id,
                guild_id: 1,
                user_id: 2,
                moderator_id: 3,
                reason: format!("reason {id}"),
                created_at: 100 * id,
            })
            .collect();

        let embed = warnings_embed(serenity::UserId::new(2), &warnings, 1);
        assert!(embed.description.starts_with("`#3`"));
        assert!(embed.fields.iter().any(|f| f.name == "Mutes" && f.value == "1"));
    }

    #[test]
    fn empty_history_is_explicit() {
        let embed = warnings_embed(serenity::UserId::new(2), &[], 0);
        assert_eq!(embed.description, "<@2> has no warnings.");
    }
}
