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
    name: "unban",
    desc: "Lift a ban.",
    category: "moderation",
    usage: "!unban <user_id> [reason]",
    params: &[
        Param::user("user", "The user to unban"),
        Param::text("reason", "Reason for the unban").optional(),
    ],
    permission: Some(serenity::Permissions::BAN_MEMBERS),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(user_id) = ctx.args.user("user") else {
        return ctx.usage().await;
    };
    let reason = ctx.args.string("reason").unwrap_or(DEFAULT_REASON);

    if let Err(source) = ctx.platform.unban(guild_id, user_id, reason).await {
        log_platform_failure(&source, "unban");
        return ctx
            .say(platform_failure_message("unban that user (are they banned?)"))
            .await;
    }

    let recorded = record_modlog(&ctx, guild_id, ModAction::Unban, user_id, reason).await;
    let embed = moderation_action_embed(user_id, "unbanned", reason, None);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
