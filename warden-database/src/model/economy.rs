#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EconomyAccount {
    pub guild_id: u64,
    pub user_id: u64,
    pub balance: i64,
    pub bank: i64,
    pub last_daily: Option<u64>,
}

impl EconomyAccount {
    pub fn empty(guild_id: u64, user_id: u64) -> Self {
        Self {
            guild_id,
            user_id,
            balance: 0,
            bank: 0,
            last_daily: None,
        }
    }

    pub fn total(&self) -> i64 {
        self.balance.saturating_add(self.bank)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DailyClaim {
    Claimed(EconomyAccount),
    TooSoon { next_claim_at: u64 },
}

/// Stock value meaning "never runs out".
pub const UNLIMITED_STOCK: i32 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopItem {
    pub id: u64,
    pub guild_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub role_id: Option<u64>,
    pub stock: i32,
}

impl ShopItem {
    pub fn in_stock(&self) -> bool {
        self.stock == UNLIMITED_STOCK || self.stock > 0
    }
}

#[derive(Clone, Debug)]
pub struct NewShopItem {
    pub guild_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub role_id: Option<u64>,
    pub stock: i32,
}
