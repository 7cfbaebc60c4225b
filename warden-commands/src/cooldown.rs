use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use poise::serenity_prelude as serenity;

/// Cooldown applied to prefix commands.
pub const PREFIX_COOLDOWN: Duration = Duration::from_millis(3000);

/// Entries past this count trigger a sweep of expired keys on the next check.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownCheck {
    Ready,
    Active { remaining: Duration },
}

/// Per (key, user) cooldowns. Nothing runs in the background; expired entries
/// are replaced on access and swept once the map grows.
#[derive(Debug)]
pub struct CooldownTracker {
    window: Duration,
    expiries: DashMap<(String, serenity::UserId), Instant>,
}

impl CooldownTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            expiries: DashMap::new(),
        }
    }

    /// Start the cooldown if it isn't running. An active cooldown is left
    /// untouched and its remaining time returned.
    pub fn check(&self, key: &str, user_id: serenity::UserId, now: Instant) -> CooldownCheck {
        if self.expiries.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }

        match self.expiries.entry((key.to_owned(), user_id)) {
            Entry::Occupied(mut entry) => {
                let expires_at = *entry.get();
                if expires_at > now {
                    return CooldownCheck::Active {
                        remaining: expires_at - now,
                    };
                }
                entry.insert(now + self.window);
                CooldownCheck::Ready
            }
            Entry::Vacant(entry) => {
                entry.insert(now + self.window);
                CooldownCheck::Ready
            }
        }
    }

    pub fn prune(&self, now: Instant) {
        self.expiries.retain(|_, expires_at| *expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }
}

pub fn cooldown_message(command: &str, remaining: Duration) -> String {
    format!(
        "Please wait {:.1} more seconds before using the `{}` command.",
        remaining.as_secs_f64(),
        command
    )
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use poise::serenity_prelude as serenity;

    use super::{CooldownCheck, CooldownTracker, PREFIX_COOLDOWN, cooldown_message};

    #[test]
    fn blocks_within_window_then_releases() {
        let tracker = CooldownTracker::new(PREFIX_COOLDOWN);
        let user = serenity::UserId::new(1);
        let start = Instant::now();

        assert_eq!(tracker.check("ban", user, start), CooldownCheck::Ready);
        assert_eq!(
            tracker.check("ban", user, start + Duration::from_millis(1000)),
            CooldownCheck::Active {
                remaining: Duration::from_millis(2000)
            }
        );
        // An active check does not extend the window.
        assert_eq!(
            tracker.check("ban", user, start + Duration::from_millis(2500)),
            CooldownCheck::Active {
                remaining: Duration::from_millis(500)
            }
        );
        assert_eq!(
            tracker.check("ban", user, start + PREFIX_COOLDOWN),
            CooldownCheck::Ready
        );
    }

    #[test]
    fn keys_and_users_are_independent() {
        let tracker = CooldownTracker::new(PREFIX_COOLDOWN);
        let now = Instant::now();

        assert_eq!(tracker.check("ban", serenity::UserId::new(1), now), CooldownCheck::Ready);
        assert_eq!(tracker.check("kick", serenity::UserId::new(1), now), CooldownCheck::Ready);
        assert_eq!(tracker.check("ban", serenity::UserId::new(2), now), CooldownCheck::Ready);
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn prune_drops_expired_entries() {
        let tracker = CooldownTracker::new(Duration::from_secs(60));
        let now = Instant::now();
        tracker.check("xp", serenity::UserId::new(1), now);
        tracker.check("xp", serenity::UserId::new(2), now + Duration::from_secs(30));

        tracker.prune(now + Duration::from_secs(61));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn message_uses_one_decimal() {
        assert_eq!(
            cooldown_message("ban", Duration::from_millis(2340)),
            "Please wait 2.3 more seconds before using the `ban` command."
        );
    }
}
