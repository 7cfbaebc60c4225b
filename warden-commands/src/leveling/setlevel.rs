use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::leveling::levels_enabled;
use warden_core::{Error, Param};
use warden_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "setlevel",
    desc: "Set a member's level.",
    category: "leveling",
    usage: "!setlevel <user> <level>",
    params: &[
        Param::user("user", "The member"),
        Param::integer("level", "The new level"),
    ],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub const MAX_LEVEL: i32 = 1_000;

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !levels_enabled(&ctx).await? {
        return Ok(());
    }

    let (Some(user_id), Some(raw_level)) = (ctx.args.user("user"), ctx.args.integer("level"))
    else {
        return ctx.usage().await;
    };
    let Some(level) = i32::try_from(raw_level)
        .ok()
        .filter(|level| (0..=MAX_LEVEL).contains(level))
    else {
        return ctx
            .say(format!("The level must be between 0 and {MAX_LEVEL}."))
            .await;
    };

    let profile = ctx
        .store
        .set_level(guild_id.get(), user_id.get(), level, now_unix_secs())
        .await?;

    ctx.say(format!(
        "<@{}> is now level {} ({} XP).",
        user_id.get(),
        profile.level,
        profile.xp
    ))
    .await
}
