use serde::{Deserialize, Serialize};

/// Actions that land in the `mod_logs` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModAction {
    Ban,
    Unban,
    Kick,
    Softban,
    Unmute,
    Purge,
    Lock,
    Unlock,
    Slowmode,
    GiveRole,
    RemoveRole,
    ClearWarns,
}

impl ModAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Unban => "unban",
            Self::Kick => "kick",
            Self::Softban => "softban",
            Self::Unmute => "unmute",
            Self::Purge => "purge",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Slowmode => "slowmode",
            Self::GiveRole => "giverole",
            Self::RemoveRole => "removerole",
            Self::ClearWarns => "clearwarns",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub id: u64,
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    pub created_at: u64,
}

#[derive(Clone, Debug)]
pub struct NewWarning {
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
}

/// A stored mute. `expires_at` is advisory: the platform timeout is what
/// actually silences the member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mute {
    pub id: u64,
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    pub created_at: u64,
    pub expires_at: u64,
}

#[derive(Clone, Debug)]
pub struct NewMute {
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    pub expires_at: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModLog {
    pub id: u64,
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub action: String,
    pub reason: Option<String>,
    pub created_at: u64,
}

#[derive(Clone, Debug)]
pub struct NewModLog {
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub action: ModAction,
    pub reason: String,
}
