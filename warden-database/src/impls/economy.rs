use anyhow::Context as _;

use crate::{
    database::Database,
    model::economy::{DailyClaim, EconomyAccount, NewShopItem, ShopItem},
};

#[derive(sqlx::FromRow)]
struct AccountRow {
    guild_id: i64,
    user_id: i64,
    balance: i64,
    bank: i64,
    last_daily: Option<i64>,
}

impl TryFrom<AccountRow> for EconomyAccount {
    type Error = anyhow::Error;

    fn try_from(row: AccountRow) -> anyhow::Result<Self> {
        Ok(Self {
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            balance: row.balance,
            bank: row.bank,
            last_daily: row
                .last_daily
                .map(u64::try_from)
                .transpose()
                .context("last_daily row out of u64 range")?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ShopItemRow {
    id: i64,
    guild_id: i64,
    name: String,
    description: Option<String>,
    price: i64,
    role_id: Option<i64>,
    stock: i32,
}

impl TryFrom<ShopItemRow> for ShopItem {
    type Error = anyhow::Error;

    fn try_from(row: ShopItemRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: u64::try_from(row.id).context("shop item id out of u64 range")?,
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            name: row.name,
            description: row.description,
            price: row.price,
            role_id: row
                .role_id
                .map(u64::try_from)
                .transpose()
                .context("role_id row out of u64 range")?,
            stock: row.stock,
        })
    }
}

async fn ensure_account(db: &Database, guild_id: i64, user_id: i64) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO economy (guild_id, user_id) VALUES ($1, $2)
         ON CONFLICT (guild_id, user_id) DO NOTHING",
    )
    .bind(guild_id)
    .bind(user_id)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Fetch a member's account, creating an empty one on first use.
pub async fn open_account(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<EconomyAccount> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    ensure_account(db, guild_id_i64, user_id_i64).await?;

    let row: AccountRow = sqlx::query_as(
        "SELECT guild_id, user_id, balance, bank, last_daily
         FROM economy
         WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_one(db.pool())
    .await?;

    EconomyAccount::try_from(row)
}

/// Add `delta` to the wallet. Returns `None` when the wallet would go negative.
pub async fn adjust_balance(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    delta: i64,
) -> anyhow::Result<Option<EconomyAccount>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    ensure_account(db, guild_id_i64, user_id_i64).await?;

    let row: Option<AccountRow> = sqlx::query_as(
        "UPDATE economy SET balance = balance + $3
         WHERE guild_id = $1 AND user_id = $2 AND balance + $3 >= 0
         RETURNING guild_id, user_id, balance, bank, last_daily",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(delta)
    .fetch_optional(db.pool())
    .await?;

    row.map(EconomyAccount::try_from).transpose()
}

/// Move `amount` from wallet to bank; a negative amount withdraws.
/// Returns `None` when the source side can't cover it.
pub async fn move_to_bank(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    amount: i64,
) -> anyhow::Result<Option<EconomyAccount>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    ensure_account(db, guild_id_i64, user_id_i64).await?;

    let row: Option<AccountRow> = sqlx::query_as(
        "UPDATE economy SET balance = balance - $3, bank = bank + $3
         WHERE guild_id = $1 AND user_id = $2 AND balance - $3 >= 0 AND bank + $3 >= 0
         RETURNING guild_id, user_id, balance, bank, last_daily",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(amount)
    .fetch_optional(db.pool())
    .await?;

    row.map(EconomyAccount::try_from).transpose()
}

/// Credit the daily reward if the cooldown has elapsed, in one statement so
/// concurrent claims can't both succeed.
pub async fn claim_daily(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    amount: i64,
    cooldown_secs: u64,
    now: u64,
) -> anyhow::Result<DailyClaim> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;
    let cooldown_i64 = i64::try_from(cooldown_secs).context("cooldown out of i64 range")?;

    ensure_account(db, guild_id_i64, user_id_i64).await?;

    let claimed: Option<AccountRow> = sqlx::query_as(
        "UPDATE economy SET balance = balance + $3, last_daily = $4
         WHERE guild_id = $1 AND user_id = $2
           AND (last_daily IS NULL OR last_daily + $5 <= $4)
         RETURNING guild_id, user_id, balance, bank, last_daily",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(amount)
    .bind(now_i64)
    .bind(cooldown_i64)
    .fetch_optional(db.pool())
    .await?;

    if let Some(row) = claimed {
        return Ok(DailyClaim::Claimed(EconomyAccount::try_from(row)?));
    }

    let account = open_account(db, guild_id, user_id).await?;
    let last_daily = account.last_daily.unwrap_or(now);
    Ok(DailyClaim::TooSoon {
        next_claim_at: last_daily.saturating_add(cooldown_secs),
    })
}

pub async fn shop_items(db: &Database, guild_id: u64) -> anyhow::Result<Vec<ShopItem>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let rows: Vec<ShopItemRow> = sqlx::query_as(
        "SELECT id, guild_id, name, description, price, role_id, stock
         FROM shop_items
         WHERE guild_id = $1
         ORDER BY price ASC, id ASC",
    )
    .bind(guild_id_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(ShopItem::try_from).collect()
}

pub async fn shop_item(db: &Database, guild_id: u64, item_id: u64) -> anyhow::Result<Option<ShopItem>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let item_id_i64 = i64::try_from(item_id).context("item_id out of i64 range")?;

    let row: Option<ShopItemRow> = sqlx::query_as(
        "SELECT id, guild_id, name, description, price, role_id, stock
         FROM shop_items
         WHERE guild_id = $1 AND id = $2",
    )
    .bind(guild_id_i64)
    .bind(item_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(ShopItem::try_from).transpose()
}

pub async fn create_shop_item(db: &Database, item: &NewShopItem) -> anyhow::Result<ShopItem> {
    let guild_id_i64 = i64::try_from(item.guild_id).context("guild_id out of i64 range")?;
    let role_id_i64 = item
        .role_id
        .map(i64::try_from)
        .transpose()
        .context("role_id out of i64 range")?;

    let row: ShopItemRow = sqlx::query_as(
        "INSERT INTO shop_items (guild_id, name, description, price, role_id, stock)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, guild_id, name, description, price, role_id, stock",
    )
    .bind(guild_id_i64)
    .bind(&item.name)
    .bind(item.description.as_deref())
    .bind(item.price)
    .bind(role_id_i64)
    .bind(item.stock)
    .fetch_one(db.pool())
    .await?;

    ShopItem::try_from(row)
}

pub async fn delete_shop_item(db: &Database, guild_id: u64, item_id: u64) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let item_id_i64 = i64::try_from(item_id).context("item_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM shop_items WHERE guild_id = $1 AND id = $2")
        .bind(guild_id_i64)
        .bind(item_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

/// Take one unit of stock. Unlimited items always succeed.
pub async fn consume_stock(db: &Database, guild_id: u64, item_id: u64) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let item_id_i64 = i64::try_from(item_id).context("item_id out of i64 range")?;

    let updated = sqlx::query(
        "UPDATE shop_items
         SET stock = CASE WHEN stock = -1 THEN -1 ELSE stock - 1 END
         WHERE guild_id = $1 AND id = $2 AND (stock = -1 OR stock > 0)",
    )
    .bind(guild_id_i64)
    .bind(item_id_i64)
    .execute(db.pool())
    .await?
    .rows_affected();

    Ok(updated > 0)
}

/// Undo [`consume_stock`] after a purchase falls through.
pub async fn release_stock(db: &Database, guild_id: u64, item_id: u64) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let item_id_i64 = i64::try_from(item_id).context("item_id out of i64 range")?;

    sqlx::query(
        "UPDATE shop_items SET stock = stock + 1
         WHERE guild_id = $1 AND id = $2 AND stock <> -1",
    )
    .bind(guild_id_i64)
    .bind(item_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}
