use std::sync::Arc;

use warden_commands::Dispatcher;
use warden_commands::cooldown::CooldownTracker;
use warden_commands::leveling::XP_COOLDOWN;
use warden_core::Platform;
use warden_database::Store;

/// State shared by every event handler.
pub struct Data {
    pub dispatcher: Dispatcher,
    pub platform: Arc<dyn Platform>,
    pub store: Arc<dyn Store>,
    pub xp_cooldowns: CooldownTracker,
}

impl Data {
    pub fn new(dispatcher: Dispatcher, platform: Arc<dyn Platform>, store: Arc<dyn Store>) -> Self {
        Self {
            dispatcher,
            platform,
            store,
            xp_cooldowns: CooldownTracker::new(XP_COOLDOWN),
        }
    }
}
