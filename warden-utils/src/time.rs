use std::time::{SystemTime, UNIX_EPOCH};

pub const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
