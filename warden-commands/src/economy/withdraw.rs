use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::{coins, economy_enabled, positive_amount};
use warden_core::{Error, Param};

pub const META: CommandMeta = CommandMeta {
    name: "withdraw",
    desc: "Move coins from the bank into your wallet.",
    category: "economy",
    usage: "!withdraw <amount>",
    params: &[Param::integer("amount", "How many coins to withdraw")],
    permission: None,
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !economy_enabled(&ctx).await? {
        return Ok(());
    }
    let Some(amount) = positive_amount(&ctx).await? else {
        return Ok(());
    };

    match ctx
        .store
        .move_to_bank(guild_id.get(), ctx.author_id().get(), -amount)
        .await?
    {
        Some(account) => {
            ctx.say(format!(
                "Withdrew {}. Wallet: {}.",
                coins(amount),
                coins(account.balance)
            ))
            .await
        }
        None => ctx.say("You don't have that many coins in the bank.").await,
    }
}
