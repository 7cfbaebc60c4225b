use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::{coins, economy_enabled};
use warden_core::Error;
use warden_database::model::economy::{ShopItem, UNLIMITED_STOCK};
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "shop",
    desc: "List the items for sale on this server.",
    category: "economy",
    usage: "!shop",
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

    let items = ctx.store.shop_items(guild_id.get()).await?;
    if items.is_empty() {
        return ctx.say("The shop is empty.").await;
    }

    let mut embed = ReplyEmbed::new("Shop", "Buy an item with `!buy <id>`.").color(INFO_COLOR);
    for item in &items {
        embed = embed.field(format!("#{} {}", item.id, item.name), item_line(item), false);
    }

    ctx.send_embed(embed).await
}

fn item_line(item: &ShopItem) -> String {
    let mut parts = vec![coins(item.price)];
    if let Some(role_id) = item.role_id {
        parts.push(format!("grants <@&{role_id}>"));
    }
    if !item.in_stock() {
        parts.push("sold out".to_owned());
    } else if item.stock != UNLIMITED_STOCK {
        parts.push(format!("{} left", item.stock));
    }
    if let Some(description) = item.description.as_deref() {
        parts.push(description.to_owned());
    }
    parts.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::item_line;
    use warden_database::model::economy::ShopItem;

    fn item(stock: i32, role_id: Option<u64>) -> ShopItem {
        ShopItem {
            id: 1,
            guild_id: 1,
            name: "VIP".to_owned(),
            description: None,
            price: 250,
            role_id,
            stock,
        }
    }

    #[test]
    fn describes_price_role_and_stock() {
        assert_eq!(item_line(&item(-1, None)), "250 coins");
        assert_eq!(item_line(&item(3, Some(9))), "250 coins · grants <@&9> · 3 left");
        assert_eq!(item_line(&item(0, None)), "250 coins · sold out");
    }
}
