use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::with_record_status;
use crate::moderation::logging::{publish_to_log_channel, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;
use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};

pub const META: CommandMeta = CommandMeta {
    name: "clearwarns",
    desc: "Delete every warning a member has.",
    category: "moderation",
    usage: "!clearwarns <user>",
    params: &[Param::user("user", "The member whose warnings to clear")],
    permission: Some(serenity::Permissions::MODERATE_MEMBERS),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let Some(user_id) = ctx.args.user("user") else {
        return ctx.usage().await;
    };

    let cleared = ctx
        .store
        .clear_warnings(guild_id.get(), user_id.get())
        .await?;

    let reason = format!("Cleared {cleared} warning(s)");
    let recorded = record_modlog(&ctx, guild_id, ModAction::ClearWarns, user_id, &reason).await;
    publish_to_log_channel(&ctx, guild_id, ModAction::ClearWarns.as_str(), user_id, &reason).await;

    let embed = ReplyEmbed::new(
        "Warnings cleared",
        format!("Cleared {} warning(s) for <@{}>.", cleared, user_id.get()),
    )
    .color(SUCCESS_COLOR);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
