use anyhow::Context as _;

use crate::cache::{CONFIG_CACHE_TTL, invalidate_server_settings, server_settings_key};
use crate::database::Database;
use crate::model::settings::{
    ChannelSetting, ChannelSettingsUpdate, ServerSettings, SettingsUpdate, join_mod_roles,
    parse_mod_roles,
};

#[derive(sqlx::FromRow)]
struct ServerSettingsRow {
    mod_roles: Option<String>,
    log_channel_id: Option<i64>,
    level_system: bool,
    economy_system: bool,
}

#[derive(sqlx::FromRow)]
struct ChannelSettingRow {
    guild_id: i64,
    channel_id: i64,
    slow_mode: Option<i32>,
    locked: bool,
}

/// Settings for a guild, or defaults when the guild has never been configured.
pub async fn server_settings(db: &Database, guild_id: u64) -> anyhow::Result<ServerSettings> {
    let cache_key = server_settings_key(db.cache(), guild_id);
    db.cache()
        .get_or_load_json(&cache_key, CONFIG_CACHE_TTL, || async {
            load_server_settings(db, guild_id).await
        })
        .await
}

async fn load_server_settings(db: &Database, guild_id: u64) -> anyhow::Result<ServerSettings> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let row: Option<ServerSettingsRow> = sqlx::query_as(
        "SELECT mod_roles, log_channel_id, level_system, economy_system
         FROM server_settings
         WHERE guild_id = $1",
    )
    .bind(guild_id_i64)
    .fetch_optional(db.pool())
    .await?;

    let Some(row) = row else {
        return Ok(ServerSettings::defaults(guild_id));
    };

    Ok(ServerSettings {
        guild_id,
        mod_roles: row.mod_roles.as_deref().map(parse_mod_roles).unwrap_or_default(),
        log_channel_id: row
            .log_channel_id
            .map(u64::try_from)
            .transpose()
            .context("log_channel_id out of u64 range")?,
        level_system: row.level_system,
        economy_system: row.economy_system,
    })
}

/// Read-modify-write the guild row, then drop the cached copy.
pub async fn update_server_settings(
    db: &Database,
    guild_id: u64,
    update: SettingsUpdate,
) -> anyhow::Result<ServerSettings> {
    let mut settings = load_server_settings(db, guild_id).await?;
    update.apply(&mut settings);

    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let log_channel_id_i64 = settings
        .log_channel_id
        .map(i64::try_from)
        .transpose()
        .context("log_channel_id out of i64 range")?;
    let mod_roles = (!settings.mod_roles.is_empty()).then(|| join_mod_roles(&settings.mod_roles));

    sqlx::query(
        "INSERT INTO server_settings (guild_id, mod_roles, log_channel_id, level_system, economy_system)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (guild_id) DO UPDATE SET
            mod_roles = EXCLUDED.mod_roles,
            log_channel_id = EXCLUDED.log_channel_id,
            level_system = EXCLUDED.level_system,
            economy_system = EXCLUDED.economy_system",
    )
    .bind(guild_id_i64)
    .bind(mod_roles)
    .bind(log_channel_id_i64)
    .bind(settings.level_system)
    .bind(settings.economy_system)
    .execute(db.pool())
    .await?;

    invalidate_server_settings(db.cache(), guild_id).await;

    Ok(settings)
}

pub async fn channel_settings(
    db: &Database,
    channel_id: u64,
) -> anyhow::Result<Option<ChannelSetting>> {
    let channel_id_i64 = i64::try_from(channel_id).context("channel_id out of i64 range")?;

    let row: Option<ChannelSettingRow> = sqlx::query_as(
        "SELECT guild_id, channel_id, slow_mode, locked FROM channel_settings WHERE channel_id = $1",
    )
    .bind(channel_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(channel_setting_from_row).transpose()
}

pub async fn update_channel_settings(
    db: &Database,
    guild_id: u64,
    channel_id: u64,
    update: ChannelSettingsUpdate,
) -> anyhow::Result<ChannelSetting> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let channel_id_i64 = i64::try_from(channel_id).context("channel_id out of i64 range")?;
    let slow_mode_i32 = update
        .slow_mode
        .map(i32::try_from)
        .transpose()
        .context("slow_mode out of i32 range")?;

    let row: ChannelSettingRow = sqlx::query_as(
        "INSERT INTO channel_settings (channel_id, guild_id, slow_mode, locked)
         VALUES ($1, $2, $3, COALESCE($4, FALSE))
         ON CONFLICT (channel_id) DO UPDATE SET
            slow_mode = COALESCE($3, channel_settings.slow_mode),
            locked = COALESCE($4, channel_settings.locked)
         RETURNING guild_id, channel_id, slow_mode, locked",
    )
    .bind(channel_id_i64)
    .bind(guild_id_i64)
    .bind(slow_mode_i32)
    .bind(update.locked)
    .fetch_one(db.pool())
    .await?;

    channel_setting_from_row(row)
}

fn channel_setting_from_row(row: ChannelSettingRow) -> anyhow::Result<ChannelSetting> {
    Ok(ChannelSetting {
        guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
        channel_id: u64::try_from(row.channel_id).context("channel_id row out of u64 range")?,
        slow_mode: row
            .slow_mode
            .map(u32::try_from)
            .transpose()
            .context("slow_mode row out of u32 range")?,
        locked: row.locked,
    })
}
