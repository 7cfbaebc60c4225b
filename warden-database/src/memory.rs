//! In-process [`Store`](crate::store::Store) used by tests across the workspace.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    impls::now_unix_secs,
    model::{
        economy::{DailyClaim, EconomyAccount, NewShopItem, ShopItem, UNLIMITED_STOCK},
        leveling::{LevelProfile, XpAward, level_for_xp, xp_for_level},
        moderation::{ModLog, Mute, NewModLog, NewMute, NewWarning, Warning},
        roles::{AutoRole, NewReactionRole, ReactionRole},
        settings::{ChannelSetting, ChannelSettingsUpdate, ServerSettings, SettingsUpdate},
    },
    store::{EconomyStore, LevelStore, ModerationStore, RoleStore, SettingsStore},
};

#[derive(Default)]
struct State {
    next_id: u64,
    warnings: Vec<Warning>,
    mutes: Vec<Mute>,
    modlogs: Vec<ModLog>,
    settings: HashMap<u64, ServerSettings>,
    channels: HashMap<u64, ChannelSetting>,
    accounts: HashMap<(u64, u64), EconomyAccount>,
    shop: Vec<ShopItem>,
    levels: HashMap<(u64, u64), LevelProfile>,
    auto_roles: Vec<AutoRole>,
    reaction_roles: Vec<ReactionRole>,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutating call return an error until switched back off.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_server_settings(&self, settings: ServerSettings) {
        self.state().settings.insert(settings.guild_id, settings);
    }

    pub fn set_balance(&self, guild_id: u64, user_id: u64, balance: i64) {
        self.state()
            .accounts
            .entry((guild_id, user_id))
            .or_insert_with(|| EconomyAccount::empty(guild_id, user_id))
            .balance = balance;
    }

    pub fn modlogs(&self) -> Vec<ModLog> {
        self.state().modlogs.clone()
    }

    pub fn all_warnings(&self) -> Vec<Warning> {
        self.state().warnings.clone()
    }

    pub fn all_mutes(&self) -> Vec<Mute> {
        self.state().mutes.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_write(&self) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("memory store writes are disabled");
        }
        Ok(())
    }
}

#[async_trait]
impl ModerationStore for MemoryStore {
    async fn create_warning(&self, warning: NewWarning) -> anyhow::Result<Warning> {
        self.check_write()?;
        let mut state = self.state();
        let stored = Warning {
            id: state.next_id(),
            guild_id: warning.guild_id,
            user_id: warning.user_id,
            moderator_id: warning.moderator_id,
            reason: warning.reason,
            created_at: now_unix_secs(),
        };
        state.warnings.push(stored.clone());
        Ok(stored)
    }

    async fn warnings(&self, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Warning>> {
        Ok(self
            .state()
            .warnings
            .iter()
            .filter(|w| w.guild_id == guild_id && w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn clear_warnings(&self, guild_id: u64, user_id: u64) -> anyhow::Result<u64> {
        self.check_write()?;
        let mut state = self.state();
        let before = state.warnings.len();
        state
            .warnings
            .retain(|w| !(w.guild_id == guild_id && w.user_id == user_id));
        Ok((before - state.warnings.len()) as u64)
    }

    async fn create_mute(&self, mute: NewMute) -> anyhow::Result<Mute> {
        self.check_write()?;
        let mut state = self.state();
        let stored = Mute {
            id: state.next_id(),
            guild_id: mute.guild_id,
            user_id: mute.user_id,
            moderator_id: mute.moderator_id,
            reason: mute.reason,
            created_at: now_unix_secs(),
            expires_at: mute.expires_at,
        };
        state.mutes.push(stored.clone());
        Ok(stored)
    }

    async fn mutes(&self, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Mute>> {
        Ok(self
            .state()
            .mutes
            .iter()
            .filter(|m| m.guild_id == guild_id && m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_modlog(&self, entry: NewModLog) -> anyhow::Result<ModLog> {
        self.check_write()?;
        let mut state = self.state();
        let stored = ModLog {
            id: state.next_id(),
            guild_id: entry.guild_id,
            user_id: entry.user_id,
            moderator_id: entry.moderator_id,
            action: entry.action.as_str().to_owned(),
            reason: Some(entry.reason),
            created_at: now_unix_secs(),
        };
        state.modlogs.push(stored.clone());
        Ok(stored)
    }

    async fn recent_modlogs(&self, guild_id: u64, limit: u32) -> anyhow::Result<Vec<ModLog>> {
        Ok(self
            .state()
            .modlogs
            .iter()
            .rev()
            .filter(|entry| entry.guild_id == guild_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn server_settings(&self, guild_id: u64) -> anyhow::Result<ServerSettings> {
        Ok(self
            .state()
            .settings
            .get(&guild_id)
            .cloned()
            .unwrap_or_else(|| ServerSettings::defaults(guild_id)))
    }

    async fn update_server_settings(
        &self,
        guild_id: u64,
        update: SettingsUpdate,
    ) -> anyhow::Result<ServerSettings> {
        self.check_write()?;
        let mut state = self.state();
        let settings = state
            .settings
            .entry(guild_id)
            .or_insert_with(|| ServerSettings::defaults(guild_id));
        update.apply(settings);
        Ok(settings.clone())
    }

    async fn channel_settings(&self, channel_id: u64) -> anyhow::Result<Option<ChannelSetting>> {
        Ok(self.state().channels.get(&channel_id).cloned())
    }

    async fn update_channel_settings(
        &self,
        guild_id: u64,
        channel_id: u64,
        update: ChannelSettingsUpdate,
    ) -> anyhow::Result<ChannelSetting> {
        self.check_write()?;
        let mut state = self.state();
        let setting = state.channels.entry(channel_id).or_insert(ChannelSetting {
            guild_id,
            channel_id,
            slow_mode: None,
            locked: false,
        });
        if let Some(slow_mode) = update.slow_mode {
            setting.slow_mode = Some(slow_mode);
        }
        if let Some(locked) = update.locked {
            setting.locked = locked;
        }
        Ok(setting.clone())
    }
}

#[async_trait]
impl EconomyStore for MemoryStore {
    async fn open_account(&self, guild_id: u64, user_id: u64) -> anyhow::Result<EconomyAccount> {
        Ok(self
            .state()
            .accounts
            .entry((guild_id, user_id))
            .or_insert_with(|| EconomyAccount::empty(guild_id, user_id))
            .clone())
    }

    async fn adjust_balance(
        &self,
        guild_id: u64,
        user_id: u64,
        delta: i64,
    ) -> anyhow::Result<Option<EconomyAccount>> {
        self.check_write()?;
        let mut state = self.state();
        let account = state
            .accounts
            .entry((guild_id, user_id))
            .or_insert_with(|| EconomyAccount::empty(guild_id, user_id));

        match account.balance.checked_add(delta) {
            Some(balance) if balance >= 0 => {
                account.balance = balance;
                Ok(Some(account.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn move_to_bank(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
    ) -> anyhow::Result<Option<EconomyAccount>> {
        self.check_write()?;
        let mut state = self.state();
        let account = state
            .accounts
            .entry((guild_id, user_id))
            .or_insert_with(|| EconomyAccount::empty(guild_id, user_id));

        let (Some(balance), Some(bank)) = (
            account.balance.checked_sub(amount),
            account.bank.checked_add(amount),
        ) else {
            return Ok(None);
        };
        if balance < 0 || bank < 0 {
            return Ok(None);
        }

        account.balance = balance;
        account.bank = bank;
        Ok(Some(account.clone()))
    }

    async fn claim_daily(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
        cooldown_secs: u64,
        now: u64,
    ) -> anyhow::Result<DailyClaim> {
        self.check_write()?;
        let mut state = self.state();
        let account = state
            .accounts
            .entry((guild_id, user_id))
            .or_insert_with(|| EconomyAccount::empty(guild_id, user_id));

        if let Some(last_daily) = account.last_daily {
            let next_claim_at = last_daily.saturating_add(cooldown_secs);
            if next_claim_at > now {
                return Ok(DailyClaim::TooSoon { next_claim_at });
            }
        }

        account.balance = account.balance.saturating_add(amount);
        account.last_daily = Some(now);
        Ok(DailyClaim::Claimed(account.clone()))
    }

    async fn shop_items(&self, guild_id: u64) -> anyhow::Result<Vec<ShopItem>> {
        let mut items: Vec<ShopItem> = self
            .state()
            .shop
            .iter()
            .filter(|item| item.guild_id == guild_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| (item.price, item.id));
        Ok(items)
    }

    async fn shop_item(&self, guild_id: u64, item_id: u64) -> anyhow::Result<Option<ShopItem>> {
        Ok(self
            .state()
            .shop
            .iter()
            .find(|item| item.guild_id == guild_id && item.id == item_id)
            .cloned())
    }

    async fn create_shop_item(&self, item: NewShopItem) -> anyhow::Result<ShopItem> {
        self.check_write()?;
        let mut state = self.state();
        let stored = ShopItem {
            id: state.next_id(),
            guild_id: item.guild_id,
            name: item.name,
            description: item.description,
            price: item.price,
            role_id: item.role_id,
            stock: item.stock,
        };
        state.shop.push(stored.clone());
        Ok(stored)
    }

    async fn delete_shop_item(&self, guild_id: u64, item_id: u64) -> anyhow::Result<bool> {
        self.check_write()?;
        let mut state = self.state();
        let before = state.shop.len();
        state
            .shop
            .retain(|item| !(item.guild_id == guild_id && item.id == item_id));
        Ok(state.shop.len() < before)
    }

    async fn consume_stock(&self, guild_id: u64, item_id: u64) -> anyhow::Result<bool> {
        self.check_write()?;
        let mut state = self.state();
        let Some(item) = state
            .shop
            .iter_mut()
            .find(|item| item.guild_id == guild_id && item.id == item_id)
        else {
            return Ok(false);
        };

        if item.stock == UNLIMITED_STOCK {
            return Ok(true);
        }
        if item.stock <= 0 {
            return Ok(false);
        }
        item.stock -= 1;
        Ok(true)
    }

    async fn release_stock(&self, guild_id: u64, item_id: u64) -> anyhow::Result<()> {
        self.check_write()?;
        let mut state = self.state();
        if let Some(item) = state.shop.iter_mut().find(|item| {
            item.guild_id == guild_id && item.id == item_id && item.stock != UNLIMITED_STOCK
        }) {
            item.stock += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl LevelStore for MemoryStore {
    async fn level_profile(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> anyhow::Result<Option<LevelProfile>> {
        Ok(self.state().levels.get(&(guild_id, user_id)).cloned())
    }

    async fn add_xp(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i64,
        now: u64,
    ) -> anyhow::Result<XpAward> {
        self.check_write()?;
        let mut state = self.state();
        let profile = state
            .levels
            .entry((guild_id, user_id))
            .or_insert(LevelProfile {
                guild_id,
                user_id,
                xp: 0,
                level: 0,
                last_message: now,
            });

        profile.xp = profile.xp.saturating_add(amount);
        profile.last_message = now;
        let new_level = level_for_xp(profile.xp);
        let leveled_up = new_level > profile.level;
        profile.level = new_level;

        Ok(XpAward {
            profile: profile.clone(),
            leveled_up,
        })
    }

    async fn set_level(
        &self,
        guild_id: u64,
        user_id: u64,
        level: i32,
        now: u64,
    ) -> anyhow::Result<LevelProfile> {
        self.check_write()?;
        let level = level.max(0);
        let mut state = self.state();
        let profile = state
            .levels
            .entry((guild_id, user_id))
            .or_insert(LevelProfile {
                guild_id,
                user_id,
                xp: 0,
                level: 0,
                last_message: now,
            });
        profile.xp = xp_for_level(level);
        profile.level = level;
        Ok(profile.clone())
    }

    async fn level_leaderboard(
        &self,
        guild_id: u64,
        limit: u32,
    ) -> anyhow::Result<Vec<LevelProfile>> {
        let mut profiles: Vec<LevelProfile> = self
            .state()
            .levels
            .values()
            .filter(|profile| profile.guild_id == guild_id)
            .cloned()
            .collect();
        profiles.sort_by(|a, b| b.xp.cmp(&a.xp).then(a.user_id.cmp(&b.user_id)));
        profiles.truncate(limit as usize);
        Ok(profiles)
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn create_auto_role(&self, guild_id: u64, role_id: u64) -> anyhow::Result<AutoRole> {
        self.check_write()?;
        let mut state = self.state();
        if let Some(existing) = state
            .auto_roles
            .iter_mut()
            .find(|role| role.guild_id == guild_id && role.role_id == role_id)
        {
            existing.enabled = true;
            return Ok(existing.clone());
        }

        let stored = AutoRole {
            id: state.next_id(),
            guild_id,
            role_id,
            enabled: true,
        };
        state.auto_roles.push(stored.clone());
        Ok(stored)
    }

    async fn auto_roles(&self, guild_id: u64) -> anyhow::Result<Vec<AutoRole>> {
        Ok(self
            .state()
            .auto_roles
            .iter()
            .filter(|role| role.guild_id == guild_id && role.enabled)
            .cloned()
            .collect())
    }

    async fn delete_auto_role(&self, guild_id: u64, role_id: u64) -> anyhow::Result<bool> {
        self.check_write()?;
        let mut state = self.state();
        let before = state.auto_roles.len();
        state
            .auto_roles
            .retain(|role| !(role.guild_id == guild_id && role.role_id == role_id));
        Ok(state.auto_roles.len() < before)
    }

    async fn create_reaction_role(&self, binding: NewReactionRole) -> anyhow::Result<ReactionRole> {
        self.check_write()?;
        let mut state = self.state();
        state.reaction_roles.retain(|existing| {
            !(existing.guild_id == binding.guild_id
                && existing.message_id == binding.message_id
                && existing.emoji == binding.emoji)
        });

        let stored = ReactionRole {
            id: state.next_id(),
            guild_id: binding.guild_id,
            channel_id: binding.channel_id,
            message_id: binding.message_id,
            role_id: binding.role_id,
            emoji: binding.emoji,
        };
        state.reaction_roles.push(stored.clone());
        Ok(stored)
    }

    async fn reaction_role(
        &self,
        guild_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> anyhow::Result<Option<ReactionRole>> {
        Ok(self
            .state()
            .reaction_roles
            .iter()
            .find(|binding| {
                binding.guild_id == guild_id
                    && binding.message_id == message_id
                    && binding.emoji == emoji
            })
            .cloned())
    }

    async fn delete_reaction_role(
        &self,
        guild_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> anyhow::Result<bool> {
        self.check_write()?;
        let mut state = self.state();
        let before = state.reaction_roles.len();
        state.reaction_roles.retain(|binding| {
            !(binding.guild_id == guild_id
                && binding.message_id == message_id
                && binding.emoji == emoji)
        });
        Ok(state.reaction_roles.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::model::economy::{DailyClaim, NewShopItem};
    use crate::store::{EconomyStore, LevelStore, ModerationStore};
    use crate::model::moderation::NewWarning;

    #[tokio::test]
    async fn daily_respects_cooldown() {
        let store = MemoryStore::new();
        let first = store.claim_daily(1, 2, 100, 86_400, 1_000).await.expect("claim");
        assert!(matches!(first, DailyClaim::Claimed(ref account) if account.balance == 100));

        let second = store.claim_daily(1, 2, 100, 86_400, 2_000).await.expect("claim");
        assert_eq!(second, DailyClaim::TooSoon { next_claim_at: 87_400 });

        let third = store.claim_daily(1, 2, 100, 86_400, 87_400).await.expect("claim");
        assert!(matches!(third, DailyClaim::Claimed(ref account) if account.balance == 200));
    }

    #[tokio::test]
    async fn balance_never_goes_negative() {
        let store = MemoryStore::new();
        store.set_balance(1, 2, 50);
        assert!(store.adjust_balance(1, 2, -60).await.expect("adjust").is_none());
        let account = store.adjust_balance(1, 2, -50).await.expect("adjust").expect("enough");
        assert_eq!(account.balance, 0);

        store.set_balance(1, 2, 30);
        assert!(store.move_to_bank(1, 2, 40).await.expect("move").is_none());
        let account = store.move_to_bank(1, 2, 30).await.expect("move").expect("enough");
        assert_eq!((account.balance, account.bank), (0, 30));
        assert!(store.move_to_bank(1, 2, -31).await.expect("move").is_none());
    }

    #[tokio::test]
    async fn limited_stock_runs_out() {
        let store = MemoryStore::new();
        let item = store
            .create_shop_item(NewShopItem {
                guild_id: 1,
                name: "Badge".to_owned(),
                description: None,
                price: 10,
                role_id: None,
                stock: 1,
            })
            .await
            .expect("create");

        assert!(store.consume_stock(1, item.id).await.expect("consume"));
        assert!(!store.consume_stock(1, item.id).await.expect("consume"));
        store.release_stock(1, item.id).await.expect("release");
        assert!(store.consume_stock(1, item.id).await.expect("consume"));
    }

    #[tokio::test]
    async fn xp_awards_report_level_ups() {
        let store = MemoryStore::new();
        let award = store.add_xp(1, 2, 90, 0).await.expect("xp");
        assert!(!award.leveled_up);
        let award = store.add_xp(1, 2, 10, 60).await.expect("xp");
        assert!(award.leveled_up);
        assert_eq!(award.profile.level, 1);
    }

    #[tokio::test]
    async fn failing_writes_surface_errors() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let result = store
            .create_warning(NewWarning {
                guild_id: 1,
                user_id: 2,
                moderator_id: 3,
                reason: "spam".to_owned(),
            })
            .await;
        assert!(result.is_err());
        assert!(store.all_warnings().is_empty());
    }
}
