pub mod additem;
pub mod balance;
pub mod buy;
pub mod daily;
pub mod deposit;
pub mod removeitem;
pub mod shop;
pub mod withdraw;

use crate::config::module_disabled;
use crate::context::CommandContext;
use warden_core::Error;

pub const DAILY_REWARD: i64 = 100;
pub const DAILY_COOLDOWN_SECS: u64 = 24 * 60 * 60;
pub const CURRENCY: &str = "coins";

/// Replies and returns `false` when the guild has switched the economy off.
pub(crate) async fn economy_enabled(ctx: &CommandContext) -> Result<bool, Error> {
    let guild_id = ctx.guild_id()?;
    let settings = ctx.store.server_settings(guild_id.get()).await?;
    if settings.economy_system {
        return Ok(true);
    }

    ctx.reply(module_disabled("economy")).await?;
    Ok(false)
}

pub(crate) fn coins(amount: i64) -> String {
    format!("{amount} {CURRENCY}")
}

/// Positive amount argument, or `None` after replying with usage.
pub(crate) async fn positive_amount(ctx: &CommandContext) -> Result<Option<i64>, Error> {
    match ctx.args.integer("amount") {
        Some(amount) if amount > 0 => Ok(Some(amount)),
        Some(_) => {
            ctx.say("The amount must be a positive number.").await?;
            Ok(None)
        }
        None => {
            ctx.usage().await?;
            Ok(None)
        }
    }
}
