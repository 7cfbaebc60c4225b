//! Storage seams used by command handlers.
//!
//! Handlers only see these traits so they can run against [`Database`] in
//! production and against an in-memory store in tests.

use async_trait::async_trait;

use crate::{
    database::Database,
    impls,
    model::{
        economy::{DailyClaim, EconomyAccount, NewShopItem, ShopItem},
        leveling::{LevelProfile, XpAward},
        moderation::{ModLog, Mute, NewModLog, NewMute, NewWarning, Warning},
        roles::{AutoRole, NewReactionRole, ReactionRole},
        settings::{ChannelSetting, ChannelSettingsUpdate, ServerSettings, SettingsUpdate},
    },
};

#[async_trait]
pub trait ModerationStore: Send + Sync {
    async fn create_warning(&self, warning: NewWarning) -> anyhow::Result<Warning>;
    async fn warnings(&self, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Warning>>;
    async fn clear_warnings(&self, guild_id: u64, user_id: u64) -> anyhow::Result<u64>;
    async fn create_mute(&self, mute: NewMute) -> anyhow::Result<Mute>;
    async fn mutes(&self, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Mute>>;
    async fn create_modlog(&self, entry: NewModLog) -> anyhow::Result<ModLog>;
    async fn recent_modlogs(&self, guild_id: u64, limit: u32) -> anyhow::Result<Vec<ModLog>>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn server_settings(&self, guild_id: u64) -> anyhow::Result<ServerSettings>;
    async fn update_server_settings(
        &self,
        guild_id: u64,
        update: SettingsUpdate,
    ) -> anyhow::Result<ServerSettings>;
    async fn channel_settings(&self, channel_id: u64) -> anyhow::Result<Option<ChannelSetting>>;
    async fn update_channel_settings(
        &self,
        guild_id: u64,
        channel_id: u64,
        update: ChannelSettingsUpdate,
    ) -> anyhow::Result<ChannelSetting>;
}

#[async_trait]
pub trait EconomyStore: Send + Sync {
    async fn open_account(&self, guild_id: u64, user_id: u64) -> anyhow::Result<EconomyAccount>;
    async fn adjust_balance(
        &self,
        guild_id: u64,
        user_id: u64,
        delta: i64,
    ) -> anyhow::Result<Option<EconomyAccount>>;
    async fn move_to_bank(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
    ) -> anyhow::Result<Option<EconomyAccount>>;
    async fn claim_daily(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
        cooldown_secs: u64,
        now: u64,
    ) -> anyhow::Result<DailyClaim>;
    async fn shop_items(&self, guild_id: u64) -> anyhow::Result<Vec<ShopItem>>;
    async fn shop_item(&self, guild_id: u64, item_id: u64) -> anyhow::Result<Option<ShopItem>>;
    async fn create_shop_item(&self, item: NewShopItem) -> anyhow::Result<ShopItem>;
    async fn delete_shop_item(&self, guild_id: u64, item_id: u64) -> anyhow::Result<bool>;
    async fn consume_stock(&self, guild_id: u64, item_id: u64) -> anyhow::Result<bool>;
    async fn release_stock(&self, guild_id: u64, item_id: u64) -> anyhow::Result<()>;
}

#[async_trait]
pub trait LevelStore: Send + Sync {
    async fn level_profile(&self, guild_id: u64, user_id: u64)
    -> anyhow::Result<Option<LevelProfile>>;
    async fn add_xp(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
        now: u64,
    ) -> anyhow::Result<XpAward>;
    async fn set_level(
        &self,
        guild_id: u64,
        user_id: u64,
        level: i32,
        now: u64,
    ) -> anyhow::Result<LevelProfile>;
    async fn level_leaderboard(&self, guild_id: u64, limit: u32)
    -> anyhow::Result<Vec<LevelProfile>>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn create_auto_role(&self, guild_id: u64, role_id: u64) -> anyhow::Result<AutoRole>;
    async fn auto_roles(&self, guild_id: u64) -> anyhow::Result<Vec<AutoRole>>;
    async fn delete_auto_role(&self, guild_id: u64, role_id: u64) -> anyhow::Result<bool>;
    async fn create_reaction_role(&self, binding: NewReactionRole) -> anyhow::Result<ReactionRole>;
    async fn reaction_role(
        &self,
        guild_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> anyhow::Result<Option<ReactionRole>>;
    async fn delete_reaction_role(
        &self,
        guild_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> anyhow::Result<bool>;
}

/// Everything a handler may touch.
pub trait Store: ModerationStore + SettingsStore + EconomyStore + LevelStore + RoleStore {}

impl<T> Store for T where T: ModerationStore + SettingsStore + EconomyStore + LevelStore + RoleStore {}

#[async_trait]
impl ModerationStore for Database {
    async fn create_warning(&self, warning: NewWarning) -> anyhow::Result<Warning> {
        impls::moderation::create_warning(self, &warning).await
    }

    async fn warnings(&self, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Warning>> {
        impls::moderation::warnings(self, guild_id, user_id).await
    }

    async fn clear_warnings(&self, guild_id: u64, user_id: u64) -> anyhow::Result<u64> {
        impls::moderation::clear_warnings(self, guild_id, user_id).await
    }

    async fn create_mute(&self, mute: NewMute) -> anyhow::Result<Mute> {
        impls::moderation::create_mute(self, &mute).await
    }

    async fn mutes(&self, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Mute>> {
        impls::moderation::mutes(self, guild_id, user_id).await
    }

    async fn create_modlog(&self, entry: NewModLog) -> anyhow::Result<ModLog> {
        impls::moderation::create_modlog(self, &entry).await
    }

    async fn recent_modlogs(&self, guild_id: u64, limit: u32) -> anyhow::Result<Vec<ModLog>> {
        impls::moderation::recent_modlogs(self, guild_id, limit).await
    }
}

#[async_trait]
impl SettingsStore for Database {
    async fn server_settings(&self, guild_id: u64) -> anyhow::Result<ServerSettings> {
        impls::settings::server_settings(self, guild_id).await
    }

    async fn update_server_settings(
        &self,
        guild_id: u64,
        update: SettingsUpdate,
    ) -> anyhow::Result<ServerSettings> {
        impls::settings::update_server_settings(self, guild_id, update).await
    }

    async fn channel_settings(&self, channel_id: u64) -> anyhow::Result<Option<ChannelSetting>> {
        impls::settings::channel_settings(self, channel_id).await
    }

    async fn update_channel_settings(
        &self,
        guild_id: u64,
        channel_id: u64,
        update: ChannelSettingsUpdate,
    ) -> anyhow::Result<ChannelSetting> {
        impls::settings::update_channel_settings(self, guild_id, channel_id, update).await
    }
}

#[async_trait]
impl EconomyStore for Database {
    async fn open_account(&self, guild_id: u64, user_id: u64) -> anyhow::Result<EconomyAccount> {
        impls::economy::open_account(self, guild_id, user_id).await
    }

    async fn adjust_balance(
        &self,
        guild_id: u64,
        user_id: u64,
        delta: i64,
    ) -> anyhow::Result<Option<EconomyAccount>> {
        impls::economy::adjust_balance(self, guild_id, user_id, delta).await
    }

    async fn move_to_bank(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
    ) -> anyhow::Result<Option<EconomyAccount>> {
        impls::economy::move_to_bank(self, guild_id, user_id, amount).await
    }

    async fn claim_daily(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
        cooldown_secs: u64,
        now: u64,
    ) -> anyhow::Result<DailyClaim> {
        impls::economy::claim_daily(self, guild_id, user_id, amount, cooldown_secs, now).await
    }

    async fn shop_items(&self, guild_id: u64) -> anyhow::Result<Vec<ShopItem>> {
        impls::economy::shop_items(self, guild_id).await
    }

    async fn shop_item(&self, guild_id: u64, item_id: u64) -> anyhow::Result<Option<ShopItem>> {
        impls::economy::shop_item(self, guild_id, item_id).await
    }

    async fn create_shop_item(&self, item: NewShopItem) -> anyhow::Result<ShopItem> {
        impls::economy::create_shop_item(self, &item).await
    }

    async fn delete_shop_item(&self, guild_id: u64, item_id: u64) -> anyhow::Result<bool> {
        impls::economy::delete_shop_item(self, guild_id, item_id).await
    }

    async fn consume_stock(&self, guild_id: u64, item_id: u64) -> anyhow::Result<bool> {
        impls::economy::consume_stock(self, guild_id, item_id).await
    }

    async fn release_stock(&self, guild_id: u64, item_id: u64) -> anyhow::Result<()> {
        impls::economy::release_stock(self, guild_id, item_id).await
    }
}

#[async_trait]
impl LevelStore for Database {
    async fn level_profile(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> anyhow::Result<Option<LevelProfile>> {
        impls::leveling::level_profile(self, guild_id, user_id).await
    }

    async fn add_xp(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
        now: u64,
    ) -> anyhow::Result<XpAward> {
        impls::leveling::add_xp(self, guild_id, user_id, amount, now).await
    }

    async fn set_level(
        &self,
        guild_id: u64,
        user_id: u64,
        level: i32,
        now: u64,
    ) -> anyhow::Result<LevelProfile> {
        impls::leveling::set_level(self, guild_id, user_id, level, now).await
    }

    async fn level_leaderboard(
        &self,
        guild_id: u64,
        limit: u32,
    ) -> anyhow::Result<Vec<LevelProfile>> {
        impls::leveling::level_leaderboard(self, guild_id, limit).await
    }
}

#[async_trait]
impl RoleStore for Database {
    async fn create_auto_role(&self, guild_id: u64, role_id: u64) -> anyhow::Result<AutoRole> {
        impls::roles::create_auto_role(self, guild_id, role_id).await
    }

    async fn auto_roles(&self, guild_id: u64) -> anyhow::Result<Vec<AutoRole>> {
        impls::roles::auto_roles(self, guild_id).await
    }

    async fn delete_auto_role(&self, guild_id: u64, role_id: u64) -> anyhow::Result<bool> {
        impls::roles::delete_auto_role(self, guild_id, role_id).await
    }

    async fn create_reaction_role(&self, binding: NewReactionRole) -> anyhow::Result<ReactionRole> {
        impls::roles::create_reaction_role(self, &binding).await
    }

    async fn reaction_role(
        &self,
        guild_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> anyhow::Result<Option<ReactionRole>> {
        impls::roles::reaction_role(self, guild_id, message_id, emoji).await
    }

    async fn delete_reaction_role(
        &self,
        guild_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> anyhow::Result<bool> {
        impls::roles::delete_reaction_role(self, guild_id, message_id, emoji).await
    }
}
