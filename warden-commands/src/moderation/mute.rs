use poise::serenity_prelude as serenity;
use tracing::error;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::{
    DEFAULT_REASON, moderation_action_embed, moderation_self_action_message,
    platform_failure_message, with_record_status,
};
use crate::moderation::logging::log_platform_failure;
use warden_core::{Error, Param};
use warden_database::model::moderation::NewMute;
use warden_utils::formatting::{format_compact_duration, relative_timestamp};
use warden_utils::parse::parse_duration_ms;
use warden_utils::time::{SECS_PER_DAY, now_unix_secs};

pub const META: CommandMeta = CommandMeta {
    name: "mute",
    desc: "Time out a member for a duration.",
    category: "moderation",
    usage: "!mute <user> <duration> [reason]",
    params: &[
        Param::user("user", "The member to mute"),
        Param::word("duration", "How long, e.g. 10m, 2h, 1d"),
        Param::text("reason", "Reason for the mute").optional(),
    ],
    permission: Some(serenity::Permissions::MODERATE_MEMBERS),
    mod_only: true,
    guild_only: true,
};

pub const MISSING_ARGUMENTS_MESSAGE: &str =
    "Please specify a member and duration (!mute @user 1h reason)";
pub const INVALID_DURATION_MESSAGE: &str = "Invalid duration format. Use 1m, 1h, 1d etc.";
pub const DURATION_RANGE_MESSAGE: &str = "Mute duration must be between 1 minute and 28 days.";

/// Longest timeout the platform accepts.
const MAX_MUTE_SECS: u64 = 28 * SECS_PER_DAY;

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let (Some(user_id), Some(raw_duration)) = (ctx.args.user("user"), ctx.args.string("duration"))
    else {
        return ctx.say(MISSING_ARGUMENTS_MESSAGE).await;
    };

    let Some(duration_ms) = parse_duration_ms(raw_duration) else {
        return ctx.say(INVALID_DURATION_MESSAGE).await;
    };

    let duration_secs = duration_ms / 1000;
    if duration_secs == 0 || duration_secs > MAX_MUTE_SECS {
        return ctx.say(DURATION_RANGE_MESSAGE).await;
    }

    if user_id == ctx.author_id() {
        return ctx.say(moderation_self_action_message("mute")).await;
    }

    let reason = ctx.args.string("reason").unwrap_or(DEFAULT_REASON);
    let expires_at = now_unix_secs().saturating_add(duration_secs);

    if let Err(source) = ctx
        .platform
        .timeout(guild_id, user_id, Some(expires_at), reason)
        .await
    {
        log_platform_failure(&source, "timeout");
        return ctx.say(platform_failure_message("mute that member")).await;
    }

    let recorded = match ctx
        .store
        .create_mute(NewMute {
            guild_id: guild_id.get(),
            user_id: user_id.get(),
            moderator_id: ctx.author_id().get(),
            reason: reason.to_owned(),
            expires_at,
        })
        .await
    {
        Ok(_) => true,
        Err(source) => {
            error!(?source, "failed to record mute");
            false
        }
    };

    let embed = moderation_action_embed(
        user_id,
        "muted",
        reason,
        Some(("Duration", format_compact_duration(duration_secs))),
    )
    .field("Expires", relative_timestamp(expires_at), true);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
