use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub guild_id: u64,
    pub mod_roles: Vec<u64>,
    pub log_channel_id: Option<u64>,
    pub level_system: bool,
    pub economy_system: bool,
}

impl ServerSettings {
    pub fn defaults(guild_id: u64) -> Self {
        Self {
            guild_id,
            mod_roles: Vec::new(),
            log_channel_id: None,
            level_system: true,
            economy_system: true,
        }
    }
}

/// Partial update applied with read-modify-write; unset fields are kept.
#[derive(Clone, Debug, Default)]
pub struct SettingsUpdate {
    pub mod_roles: Option<Vec<u64>>,
    pub log_channel_id: Option<Option<u64>>,
    pub level_system: Option<bool>,
    pub economy_system: Option<bool>,
}

impl SettingsUpdate {
    pub fn apply(self, settings: &mut ServerSettings) {
        if let Some(mod_roles) = self.mod_roles {
            settings.mod_roles = mod_roles;
        }
        if let Some(log_channel_id) = self.log_channel_id {
            settings.log_channel_id = log_channel_id;
        }
        if let Some(level_system) = self.level_system {
            settings.level_system = level_system;
        }
        if let Some(economy_system) = self.economy_system {
            settings.economy_system = economy_system;
        }
    }
}

/// Parse the stored comma-joined moderator role list, skipping junk entries.
pub fn parse_mod_roles(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|entry| entry.trim().parse::<u64>().ok())
        .collect()
}

pub fn join_mod_roles(roles: &[u64]) -> String {
    roles
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSetting {
    pub guild_id: u64,
    pub channel_id: u64,
    pub slow_mode: Option<u32>,
    pub locked: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ChannelSettingsUpdate {
    pub slow_mode: Option<u32>,
    pub locked: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::{ServerSettings, SettingsUpdate, join_mod_roles, parse_mod_roles};

    #[test]
    fn mod_roles_round_trip_through_text() {
        let roles = vec![11, 22, 33];
        assert_eq!(parse_mod_roles(&join_mod_roles(&roles)), roles);
        assert_eq!(parse_mod_roles(""), Vec::<u64>::new());
        assert_eq!(parse_mod_roles("11, x ,22"), vec![11, 22]);
    }

    #[test]
    fn update_keeps_unset_fields() {
        let mut settings = ServerSettings::defaults(1);
        settings.mod_roles = vec![5];

        SettingsUpdate {
            log_channel_id: Some(Some(9)),
            ..Default::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.mod_roles, vec![5]);
        assert_eq!(settings.log_channel_id, Some(9));
        assert!(settings.level_system);

        SettingsUpdate {
            log_channel_id: Some(None),
            economy_system: Some(false),
            ..Default::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.log_channel_id, None);
        assert!(!settings.economy_system);
    }
}
