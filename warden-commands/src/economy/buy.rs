use poise::serenity_prelude as serenity;
use tracing::error;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::{coins, economy_enabled};
use crate::moderation::logging::log_platform_failure;
use warden_core::{Error, Param};
use warden_utils::embed::{ReplyEmbed, SUCCESS_COLOR};

pub const META: CommandMeta = CommandMeta {
    name: "buy",
    desc: "Buy an item from the shop.",
    category: "economy",
    usage: "!buy <id>",
    params: &[Param::integer("id", "The item id from !shop")],
    permission: None,
    mod_only: false,
    guild_only: true,
};

pub const ROLE_GRANT_FAILED_MESSAGE: &str =
    "I couldn't give you that item's role, so you have been refunded.";

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !economy_enabled(&ctx).await? {
        return Ok(());
    }

    let Some(item_id) = ctx.args.integer("id").and_then(|id| u64::try_from(id).ok()) else {
        return ctx.usage().await;
    };

    let Some(item) = ctx.store.shop_item(guild_id.get(), item_id).await? else {
        return ctx.say(format!("There is no item #{item_id} in the shop.")).await;
    };

    if !ctx.store.consume_stock(guild_id.get(), item.id).await? {
        return ctx.say(format!("**{}** is sold out.", item.name)).await;
    }

    let buyer = ctx.author_id();
    let debited = ctx
        .store
        .adjust_balance(guild_id.get(), buyer.get(), -item.price)
        .await;
    let account = match debited {
        Ok(Some(account)) => account,
        Ok(None) => {
            release_stock(&ctx, guild_id, item.id).await;
            return ctx
                .say(format!(
                    "You need {} in your wallet to buy **{}**.",
                    coins(item.price),
                    item.name
                ))
                .await;
        }
        Err(source) => {
            release_stock(&ctx, guild_id, item.id).await;
            return Err(source);
        }
    };

    if let Some(role_id) = item.role_id {
        let reason = format!("Bought shop item #{}", item.id);
        if let Err(source) = ctx
            .platform
            .add_role(guild_id, buyer, serenity::RoleId::new(role_id), &reason)
            .await
        {
            log_platform_failure(&source, "add_role");
            if let Err(source) = ctx
                .store
                .adjust_balance(guild_id.get(), buyer.get(), item.price)
                .await
            {
                error!(?source, item_id = item.id, "failed to refund shop purchase");
            }
            release_stock(&ctx, guild_id, item.id).await;
            return ctx.say(ROLE_GRANT_FAILED_MESSAGE).await;
        }
    }

    let embed = ReplyEmbed::new(
        "Purchase complete",
        format!("You bought **{}** for {}.", item.name, coins(item.price)),
    )
    .color(SUCCESS_COLOR)
    .field("Wallet", coins(account.balance), true);

    ctx.send_embed(embed).await
}

async fn release_stock(ctx: &CommandContext, guild_id: serenity::GuildId, item_id: u64) {
    if let Err(source) = ctx.store.release_stock(guild_id.get(), item_id).await {
        error!(?source, item_id, "failed to release reserved stock");
    }
}
