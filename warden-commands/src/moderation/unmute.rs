use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::{
    DEFAULT_REASON, moderation_action_embed, platform_failure_message, with_record_status,
};
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;

pub const META: CommandMeta = CommandMeta {
    name: "unmute",
    desc: "Remove a member's timeout.",
    category: "moderation",
    usage: "!unmute <user> [reason]",
    params: &[
        Param::user("user", "The member to unmute"),
        Param::text("reason", "Reason for the unmute").optional(),
    ],
    permission: Some(serenity::Permissions::MODERATE_MEMBERS),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(user_id) = ctx.args.user("user") else {
        return ctx.usage().await;
    };
    let reason = ctx.args.string("reason").unwrap_or(DEFAULT_REASON);

    if let Err(source) = ctx.platform.timeout(guild_id, user_id, None, reason).await {
        log_platform_failure(&source, "timeout");
        return ctx.say(platform_failure_message("unmute that member")).await;
    }

    let recorded = record_modlog(&ctx, guild_id, ModAction::Unmute, user_id, reason).await;
    let embed = moderation_action_embed(user_id, "unmuted", reason, None);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
