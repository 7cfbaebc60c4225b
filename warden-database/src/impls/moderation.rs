use anyhow::Context as _;

use crate::{
    database::Database,
    impls::now_unix_secs,
    model::moderation::{ModLog, Mute, NewModLog, NewMute, NewWarning, Warning},
};

#[derive(sqlx::FromRow)]
struct WarningRow {
    id: i64,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    reason: String,
    created_at: i64,
}

impl TryFrom<WarningRow> for Warning {
    type Error = anyhow::Error;

    fn try_from(row: WarningRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: u64::try_from(row.id).context("warning id out of u64 range")?,
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            moderator_id: u64::try_from(row.moderator_id)
                .context("moderator_id row out of u64 range")?,
            reason: row.reason,
            created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MuteRow {
    id: i64,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    reason: String,
    created_at: i64,
    expires_at: i64,
}

impl TryFrom<MuteRow> for Mute {
    type Error = anyhow::Error;

    fn try_from(row: MuteRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: u64::try_from(row.id).context("mute id out of u64 range")?,
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            moderator_id: u64::try_from(row.moderator_id)
                .context("moderator_id row out of u64 range")?,
            reason: row.reason,
            created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
            expires_at: u64::try_from(row.expires_at).context("expires_at row out of u64 range")?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ModLogRow {
    id: i64,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    action: String,
    reason: Option<String>,
    created_at: i64,
}

impl TryFrom<ModLogRow> for ModLog {
    type Error = anyhow::Error;

    fn try_from(row: ModLogRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: u64::try_from(row.id).context("mod log id out of u64 range")?,
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            moderator_id: u64::try_from(row.moderator_id)
                .context("moderator_id row out of u64 range")?,
            action: row.action,
            reason: row.reason,
            created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        })
    }
}

pub async fn create_warning(db: &Database, warning: &NewWarning) -> anyhow::Result<Warning> {
    let guild_id_i64 = i64::try_from(warning.guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(warning.user_id).context("user_id out of i64 range")?;
    let moderator_id_i64 =
        i64::try_from(warning.moderator_id).context("moderator_id out of i64 range")?;
    let created_at_i64 = i64::try_from(now_unix_secs()).context("created_at out of i64 range")?;

    let row: WarningRow = sqlx::query_as(
        "INSERT INTO warnings (guild_id, user_id, moderator_id, reason, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, guild_id, user_id, moderator_id, reason, created_at",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(moderator_id_i64)
    .bind(&warning.reason)
    .bind(created_at_i64)
    .fetch_one(db.pool())
    .await?;

    Warning::try_from(row)
}

/// Warnings for a member, oldest first.
pub async fn warnings(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Warning>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let rows: Vec<WarningRow> = sqlx::query_as(
        "SELECT id, guild_id, user_id, moderator_id, reason, created_at
         FROM warnings
         WHERE guild_id = $1 AND user_id = $2
         ORDER BY created_at ASC, id ASC",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(Warning::try_from).collect()
}

pub async fn clear_warnings(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<u64> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM warnings WHERE guild_id = $1 AND user_id = $2")
        .bind(guild_id_i64)
        .bind(user_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted)
}

pub async fn create_mute(db: &Database, mute: &NewMute) -> anyhow::Result<Mute> {
    let guild_id_i64 = i64::try_from(mute.guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(mute.user_id).context("user_id out of i64 range")?;
    let moderator_id_i64 =
        i64::try_from(mute.moderator_id).context("moderator_id out of i64 range")?;
    let created_at_i64 = i64::try_from(now_unix_secs()).context("created_at out of i64 range")?;
    let expires_at_i64 = i64::try_from(mute.expires_at).context("expires_at out of i64 range")?;

    let row: MuteRow = sqlx::query_as(
        "INSERT INTO mutes (guild_id, user_id, moderator_id, reason, created_at, expires_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, guild_id, user_id, moderator_id, reason, created_at, expires_at",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(moderator_id_i64)
    .bind(&mute.reason)
    .bind(created_at_i64)
    .bind(expires_at_i64)
    .fetch_one(db.pool())
    .await?;

    Mute::try_from(row)
}

pub async fn mutes(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<Vec<Mute>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let rows: Vec<MuteRow> = sqlx::query_as(
        "SELECT id, guild_id, user_id, moderator_id, reason, created_at, expires_at
         FROM mutes
         WHERE guild_id = $1 AND user_id = $2
         ORDER BY created_at ASC, id ASC",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(Mute::try_from).collect()
}

pub async fn create_modlog(db: &Database, entry: &NewModLog) -> anyhow::Result<ModLog> {
    let guild_id_i64 = i64::try_from(entry.guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(entry.user_id).context("user_id out of i64 range")?;
    let moderator_id_i64 =
        i64::try_from(entry.moderator_id).context("moderator_id out of i64 range")?;
    let created_at_i64 = i64::try_from(now_unix_secs()).context("created_at out of i64 range")?;

    let row: ModLogRow = sqlx::query_as(
        "INSERT INTO mod_logs (guild_id, user_id, moderator_id, action, reason, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, guild_id, user_id, moderator_id, action, reason, created_at",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(moderator_id_i64)
    .bind(entry.action.as_str())
    .bind(&entry.reason)
    .bind(created_at_i64)
    .fetch_one(db.pool())
    .await?;

    ModLog::try_from(row)
}

/// Newest entries first.
pub async fn recent_modlogs(db: &Database, guild_id: u64, limit: u32) -> anyhow::Result<Vec<ModLog>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let rows: Vec<ModLogRow> = sqlx::query_as(
        "SELECT id, guild_id, user_id, moderator_id, action, reason, created_at
         FROM mod_logs
         WHERE guild_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2",
    )
    .bind(guild_id_i64)
    .bind(i64::from(limit))
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(ModLog::try_from).collect()
}
