pub mod economy;
pub mod leveling;
pub mod moderation;
pub mod roles;
pub mod settings;

use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
