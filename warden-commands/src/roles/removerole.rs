use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::{platform_failure_message, with_record_status};
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;
use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};

pub const META: CommandMeta = CommandMeta {
    name: "removerole",
    desc: "Take a role away from a member.",
    category: "roles",
    usage: "!removerole <user> <role>",
    params: &[
        Param::user("user", "The member to remove the role from"),
        Param::role("role", "The role to remove"),
    ],
    permission: Some(serenity::Permissions::MANAGE_ROLES),
    mod_only: true,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    let (Some(user_id), Some(role_id)) = (ctx.args.user("user"), ctx.args.role("role")) else {
        return ctx.usage().await;
    };

    let reason = format!("Role <@&{}> removed by <@{}>", role_id.get(), ctx.author_id().get());

    if let Err(source) = ctx
        .platform
        .remove_role(guild_id, user_id, role_id, &reason)
        .await
    {
        log_platform_failure(&source, "remove_role");
        return ctx.say(platform_failure_message("remove that role")).await;
    }

    let recorded = record_modlog(&ctx, guild_id, ModAction::RemoveRole, user_id, &reason).await;
    let embed = ReplyEmbed::new(
        "Role removed",
        format!("Removed <@&{}> from <@{}>.", role_id.get(), user_id.get()),
    )
    .color(SUCCESS_COLOR);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
