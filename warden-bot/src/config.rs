use std::env;

use anyhow::Context as _;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_REDIS_KEY_PREFIX: &str = "warden:prod";

/// Startup settings read from the environment (and `.env`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    /// Register slash commands in this guild only; global otherwise.
    pub guild_id: Option<u64>,
    pub database_max_connections: u32,
    pub redis_enabled: bool,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
    pub auto_run_migrations: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        let guild_id = match lookup("DISCORD_GUILD_ID").filter(|value| !value.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("DISCORD_GUILD_ID must be a numeric id")?,
            ),
            None => None,
        };

        let max_connections = env_u64(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            u64::from(DEFAULT_MAX_CONNECTIONS),
        );

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            guild_id,
            database_max_connections: u32::try_from(max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS)
                .max(1),
            redis_enabled: env_bool(&lookup, "REDIS_ENABLED", false),
            redis_url: lookup("REDIS_URL").filter(|value| !value.trim().is_empty()),
            redis_key_prefix: lookup("REDIS_KEY_PREFIX")
                .unwrap_or_else(|| DEFAULT_REDIS_KEY_PREFIX.to_owned()),
            auto_run_migrations: env_bool(&lookup, "AUTO_RUN_MIGRATIONS", true),
        })
    }
}

fn env_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key) {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

fn env_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match lookup(key) {
        Some(value) => value.trim().parse::<u64>().unwrap_or(default),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Config, DEFAULT_MAX_CONNECTIONS, DEFAULT_REDIS_KEY_PREFIX};

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_and_database_url_are_required() {
        let err = config_from(&[("DATABASE_URL", "postgres://localhost/warden")])
            .expect_err("missing token");
        assert!(err.to_string().contains("DISCORD_TOKEN"));

        let err = config_from(&[("DISCORD_TOKEN", "token"), ("DATABASE_URL", "  ")])
            .expect_err("blank url");
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn optional_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_URL", "postgres://localhost/warden"),
            ("DATABASE_MAX_CONNECTIONS", "lots"),
        ])
        .expect("config");

        assert_eq!(config.guild_id, None);
        assert_eq!(config.database_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!config.redis_enabled);
        assert_eq!(config.redis_key_prefix, DEFAULT_REDIS_KEY_PREFIX);
        assert!(config.auto_run_migrations);
    }

    #[test]
    fn parses_flags_and_guild_id() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_URL", "postgres://localhost/warden"),
            ("DISCORD_GUILD_ID", "1234"),
            ("REDIS_ENABLED", "Yes"),
            ("REDIS_URL", "redis://127.0.0.1/"),
            ("AUTO_RUN_MIGRATIONS", "off"),
        ])
        .expect("config");

        assert_eq!(config.guild_id, Some(1234));
        assert!(config.redis_enabled);
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1/"));
        assert!(!config.auto_run_migrations);

        assert!(
            config_from(&[
                ("DISCORD_TOKEN", "token"),
                ("DATABASE_URL", "postgres://localhost/warden"),
                ("DISCORD_GUILD_ID", "general"),
            ])
            .is_err()
        );
    }
}
