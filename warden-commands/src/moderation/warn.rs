use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::{
    DEFAULT_REASON, moderation_action_embed, moderation_self_action_message,
};
use crate::moderation::logging::publish_to_log_channel;
use warden_core::{Error, Param};
use warden_database::model::moderation::NewWarning;

pub const META: CommandMeta = CommandMeta {
    name: "warn",
    desc: "Warn a member.",
    category: "moderation",
    usage: "!warn <user> [reason]",
    params: &[
        Param::user("user", "The member to warn"),
        Param::text("reason", "Reason for the warning").optional(),
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

    if user_id == ctx.author_id() {
        return ctx.say(moderation_self_action_message("warn")).await;
    }

    let reason = ctx.args.string("reason").unwrap_or(DEFAULT_REASON);

    let warning = ctx
        .store
        .create_warning(NewWarning {
            guild_id: guild_id.get(),
            user_id: user_id.get(),
            moderator_id: ctx.author_id().get(),
            reason: reason.to_owned(),
        })
        .await?;

    publish_to_log_channel(&ctx, guild_id, "warn", user_id, reason).await;

    let total = ctx
        .store
        .warnings(guild_id.get(), user_id.get())
        .await
        .map(|warnings| warnings.len())
        .ok();

    let mut embed = moderation_action_embed(
        user_id,
        "warned",
        reason,
        Some(("Warning ID", format!("#{}", warning.id))),
    );
    if let Some(total) = total {
        embed = embed.field("Total warnings", total.to_string(), true);
    }

    ctx.send_embed(embed).await
}
