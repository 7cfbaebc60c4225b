use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::moderation::embeds::{platform_failure_message, with_record_status};
use crate::moderation::logging::{log_platform_failure, record_modlog};
use warden_core::{Error, Param};
use warden_database::model::moderation::ModAction;
use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};

pub const META: CommandMeta = CommandMeta {
    name: "giverole",
    desc: "Give a role to a member.",
    category: "roles",
    usage: "!giverole <user> <role>",
    params: &[
        Param::user("user", "The member to give the role to"),
        Param::role("role", "The role to give"),
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

    let reason = format!("Role <@&{}> given by <@{}>", role_id.get(), ctx.author_id().get());

    if let Err(source) = ctx
        .platform
        .add_role(guild_id, user_id, role_id, &reason)
        .await
    {
        log_platform_failure(&source, "add_role");
        return ctx.say(platform_failure_message("give that role")).await;
    }

    let recorded = record_modlog(&ctx, guild_id, ModAction::GiveRole, user_id, &reason).await;
    let embed = ReplyEmbed::new(
        "Role given",
        format!("Gave <@&{}> to <@{}>.", role_id.get(), user_id.get()),
    )
    .color(SUCCESS_COLOR);
    ctx.send_embed(with_record_status(embed, recorded)).await
}
