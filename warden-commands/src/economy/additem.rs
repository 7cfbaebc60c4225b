use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::{coins, economy_enabled};
use warden_core::{Error, Param};
use warden_database::model::economy::{NewShopItem, UNLIMITED_STOCK};

pub const META: CommandMeta = CommandMeta {
    name: "additem",
    desc: "Add an item to the shop.",
    category: "economy",
    usage: "!additem <price> [stock] [role] <name>",
    params: &[
        Param::integer("price", "Price in coins"),
        Param::integer("stock", "How many can be sold; unlimited if omitted").optional(),
        Param::role("role", "Role granted on purchase").optional(),
        Param::text("name", "Item name"),
    ],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !economy_enabled(&ctx).await? {
        return Ok(());
    }

    let (Some(price), Some(name)) = (ctx.args.integer("price"), ctx.args.string("name")) else {
        return ctx.usage().await;
    };
    if price <= 0 {
        return ctx.say("The price must be a positive number.").await;
    }

    let stock = match ctx.args.integer("stock") {
        None => UNLIMITED_STOCK,
        Some(stock) => match i32::try_from(stock) {
            Ok(stock) if stock > 0 => stock,
            _ => return ctx.say("Stock must be a positive number.").await,
        },
    };

    let item = ctx
        .store
        .create_shop_item(NewShopItem {
            guild_id: guild_id.get(),
            name: name.to_owned(),
            description: None,
            price,
            role_id: ctx.args.role("role").map(|role_id| role_id.get()),
            stock,
        })
        .await?;

    ctx.say(format!(
        "Added **{}** (#{}) to the shop for {}.",
        item.name,
        item.id,
        coins(item.price)
    ))
    .await
}
