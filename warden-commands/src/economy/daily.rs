use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::{DAILY_COOLDOWN_SECS, DAILY_REWARD, coins, economy_enabled};
use warden_core::Error;
use warden_database::model::economy::DailyClaim;
use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};
use warden_utils::formatting::relative_timestamp;
use warden_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "daily",
    desc: "Claim your daily coins.",
    category: "economy",
    usage: "!daily",
    params: &[],
    permission: None,
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !economy_enabled(&ctx).await? {
        return Ok(());
    }

    let claim = ctx
        .store
        .claim_daily(
            guild_id.get(),
            ctx.author_id().get(),
            DAILY_REWARD,
            DAILY_COOLDOWN_SECS,
            now_unix_secs(),
        )
        .await?;

    match claim {
        DailyClaim::Claimed(account) => {
            let embed = ReplyEmbed::new(
                "Daily reward",
                format!("You received {}.", coins(DAILY_REWARD)),
            )
            .color(SUCCESS_COLOR)
            .field("Wallet", coins(account.balance), true);
            ctx.send_embed(embed).await
        }
        DailyClaim::TooSoon { next_claim_at } => {
            ctx.say(format!(
                "You already claimed your daily reward. Come back {}.",
                relative_timestamp(next_claim_at)
            ))
            .await
        }
    }
}
