use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::{coins, economy_enabled, positive_amount};
use warden_core::{Error, Param};

pub const META: CommandMeta = CommandMeta {
    name: "deposit",
    desc: "Move coins from your wallet into the bank.",
    category: "economy",
    usage: "!deposit <amount>",
    params: &[Param::integer("amount", "How many coins to deposit")],
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
        .move_to_bank(guild_id.get(), ctx.author_id().get(), amount)
        .await?
    {
        Some(account) => {
            ctx.say(format!(
                "Deposited {}. Bank: {}.",
                coins(amount),
                coins(account.bank)
            ))
            .await
        }
        None => ctx.say("You don't have that many coins in your wallet.").await,
    }
}
