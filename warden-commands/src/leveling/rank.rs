use crate::CommandMeta;
use crate::context::CommandContext;
use crate::leveling::levels_enabled;
use warden_core::{Error, Param};
use warden_database::model::leveling::xp_for_level;
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "rank",
    desc: "Show a member's level and XP.",
    category: "leveling",
    usage: "!rank [user]",
    params: &[Param::user("user", "Whose rank to show").optional()],
    permission: None,
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !levels_enabled(&ctx).await? {
        return Ok(());
    }

    let user_id = ctx.args.user("user").unwrap_or_else(|| ctx.author_id());
    let Some(profile) = ctx
        .store
        .level_profile(guild_id.get(), user_id.get())
        .await?
    else {
        return ctx
            .say(format!("<@{}> hasn't earned any XP yet.", user_id.get()))
            .await;
    };

    let next = xp_for_level(profile.level.saturating_add(1));
    let embed = ReplyEmbed::new("Rank", format!("<@{}>", user_id.get()))
        .color(INFO_COLOR)
        .field("Level", profile.level.to_string(), true)
        .field("XP", format!("{} / {}", profile.xp, next), true);

    ctx.send_embed(embed).await
}
