use crate::CommandMeta;
use crate::context::CommandContext;
use crate::leveling::{LEADERBOARD_SIZE, levels_enabled};
use warden_core::Error;
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "levels",
    desc: "Show the server's XP leaderboard.",
    category: "leveling",
    usage: "!levels",
    params: &[],
    permission: None,
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !levels_enabled(&ctx).await? {
        return Ok(());
    }

    let profiles = ctx
        .store
        .level_leaderboard(guild_id.get(), LEADERBOARD_SIZE)
        .await?;
    if profiles.is_empty() {
        return ctx.say("Nobody has earned any XP yet.").await;
    }

    let description = profiles
        .iter()
        .enumerate()
        .map(|(index, profile)| {
            format!(
                "**{}.** <@{}> · level {} ({} XP)",
                index + 1,
                profile.user_id,
                profile.level,
                profile.xp
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    ctx.send_embed(ReplyEmbed::new("Leaderboard", description).color(INFO_COLOR))
        .await
}
