use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::{
    DEFAULT_REASON, moderation_action_embed, moderation_self_action_message,
    platform_failure_message, with_record_status,
};
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;

pub const META: CommandMeta = CommandMeta {
    name: "kick",
    desc: "Kick a member from the server.",
    category: "moderation",
    usage: "!kick <user> [reason]",
    params: &[
        Param::user("user", "The member to kick"),
        Param::text("reason", "Reason for the kick").optional(),
    ],
    permission: Some(serenity::Permissions::KICK_MEMBERS),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(user_id) = ctx.args.user("user") else {
        return ctx.usage().await;
    };

    if user_id == ctx.author_id() {
        return ctx.say(moderation_self_action_message("kick")).await;
    }

    let reason = ctx.args.string("reason").unwrap_or(DEFAULT_REASON);

    if let Err(source) = ctx.platform.kick(guild_id, user_id, reason).await {
        log_platform_failure(&source, "kick");
        return ctx.say(platform_failure_message("kick that member")).await;
    }

    let recorded = record_modlog(&ctx, guild_id, ModAction::Kick, user_id, reason).await;
    let embed = moderation_action_embed(user_id, "kicked", reason, None);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
