pub mod levels;
pub mod rank;
pub mod setlevel;

use std::time::Duration;

use crate::config::module_disabled;
use crate::context::CommandContext;
use warden_core::Error;

pub const XP_PER_MESSAGE: i64 = 10;
pub const XP_COOLDOWN: Duration = Duration::from_secs(60);
pub const LEADERBOARD_SIZE: u32 = 10;

pub(crate) async fn levels_enabled(ctx: &CommandContext) -> Result<bool, Error> {
    let guild_id = ctx.guild_id()?;
    let settings = ctx.store.server_settings(guild_id.get()).await?;
    if settings.level_system {
        return Ok(true);
    }

    ctx.reply(module_disabled("levels")).await?;
    Ok(false)
}
