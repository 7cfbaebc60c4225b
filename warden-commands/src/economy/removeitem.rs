use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::economy::economy_enabled;
use warden_core::{Error, Param};

pub const META: CommandMeta = CommandMeta {
    name: "removeitem",
    desc: "Remove an item from the shop.",
    category: "economy",
    usage: "!removeitem <id>",
    params: &[Param::integer("id", "The item id from !shop")],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;
    if !economy_enabled(&ctx).await? {
        return Ok(());
    }

    let Some(item_id) = ctx.args.integer("id").and_then(|id| u64::try_from(id).ok()) else {
        return ctx.usage().await;
    };

    if ctx.store.delete_shop_item(guild_id.get(), item_id).await? {
        ctx.say(format!("Removed item #{item_id} from the shop.")).await
    } else {
        ctx.say(format!("There is no item #{item_id} in the shop.")).await
    }
}
