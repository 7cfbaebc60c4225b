use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::{coins, economy_enabled};
use warden_core::{Error, Param};
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "balance",
    desc: "Show your wallet and bank balance.",
    category: "economy",
    usage: "!balance [user]",
    params: &[Param::user("user", "Whose balance to show").optional()],
    permission: None,
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !economy_enabled(&ctx).await? {
        return Ok(());
    }

    let user_id = ctx.args.user("user").unwrap_or_else(|| ctx.author_id());
    let account = ctx.store.open_account(guild_id.get(), user_id.get()).await?;

    let embed = ReplyEmbed::new("Balance", format!("<@{}>", user_id.get()))
        .color(INFO_COLOR)
        .field("Wallet", coins(account.balance), true)
        .field("Bank", coins(account.bank), true)
        .field("Total", coins(account.total()), true);

    ctx.send_embed(embed).await
}
