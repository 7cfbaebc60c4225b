use anyhow::Context as _;

use crate::{
    database::Database,
    model::roles::{AutoRole, NewReactionRole, ReactionRole},
};

#[derive(sqlx::FromRow)]
struct AutoRoleRow {
    id: i64,
    guild_id: i64,
    role_id: i64,
    enabled: bool,
}

impl TryFrom<AutoRoleRow> for AutoRole {
    type Error = anyhow::Error;

    fn try_from(row: AutoRoleRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: u64::try_from(row.id).context("auto role id out of u64 range")?,
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            role_id: u64::try_from(row.role_id).context("role_id row out of u64 range")?,
            enabled: row.enabled,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReactionRoleRow {
    id: i64,
    guild_id: i64,
    channel_id: i64,
    message_id: i64,
    role_id: i64,
    emoji: String,
}

impl TryFrom<ReactionRoleRow> for ReactionRole {
    type Error = anyhow::Error;

    fn try_from(row: ReactionRoleRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: u64::try_from(row.id).context("reaction role id out of u64 range")?,
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            channel_id: u64::try_from(row.channel_id).context("channel_id row out of u64 range")?,
            message_id: u64::try_from(row.message_id).context("message_id row out of u64 range")?,
            role_id: u64::try_from(row.role_id).context("role_id row out of u64 range")?,
            emoji: row.emoji,
        })
    }
}

pub async fn create_auto_role(db: &Database, guild_id: u64, role_id: u64) -> anyhow::Result<AutoRole> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let role_id_i64 = i64::try_from(role_id).context("role_id out of i64 range")?;

    let row: AutoRoleRow = sqlx::query_as(
        "INSERT INTO auto_roles (guild_id, role_id, enabled)
         VALUES ($1, $2, TRUE)
         ON CONFLICT (guild_id, role_id) DO UPDATE SET enabled = TRUE
         RETURNING id, guild_id, role_id, enabled",
    )
    .bind(guild_id_i64)
    .bind(role_id_i64)
    .fetch_one(db.pool())
    .await?;

    AutoRole::try_from(row)
}

/// Enabled auto roles only.
pub async fn auto_roles(db: &Database, guild_id: u64) -> anyhow::Result<Vec<AutoRole>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let rows: Vec<AutoRoleRow> = sqlx::query_as(
        "SELECT id, guild_id, role_id, enabled
         FROM auto_roles
         WHERE guild_id = $1 AND enabled = TRUE
         ORDER BY id ASC",
    )
    .bind(guild_id_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(AutoRole::try_from).collect()
}

pub async fn delete_auto_role(db: &Database, guild_id: u64, role_id: u64) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let role_id_i64 = i64::try_from(role_id).context("role_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM auto_roles WHERE guild_id = $1 AND role_id = $2")
        .bind(guild_id_i64)
        .bind(role_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

pub async fn create_reaction_role(
    db: &Database,
    binding: &NewReactionRole,
) -> anyhow::Result<ReactionRole> {
    let guild_id_i64 = i64::try_from(binding.guild_id).context("guild_id out of i64 range")?;
    let channel_id_i64 = i64::try_from(binding.channel_id).context("channel_id out of i64 range")?;
    let message_id_i64 = i64::try_from(binding.message_id).context("message_id out of i64 range")?;
    let role_id_i64 = i64::try_from(binding.role_id).context("role_id out of i64 range")?;

    let row: ReactionRoleRow = sqlx::query_as(
        "INSERT INTO reaction_roles (guild_id, channel_id, message_id, role_id, emoji)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (guild_id, message_id, emoji) DO UPDATE SET
            channel_id = EXCLUDED.channel_id,
            role_id = EXCLUDED.role_id
         RETURNING id, guild_id, channel_id, message_id, role_id, emoji",
    )
    .bind(guild_id_i64)
    .bind(channel_id_i64)
    .bind(message_id_i64)
    .bind(role_id_i64)
    .bind(&binding.emoji)
    .fetch_one(db.pool())
    .await?;

    ReactionRole::try_from(row)
}

pub async fn reaction_role(
    db: &Database,
    guild_id: u64,
    message_id: u64,
    emoji: &str,
) -> anyhow::Result<Option<ReactionRole>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let message_id_i64 = i64::try_from(message_id).context("message_id out of i64 range")?;

    let row: Option<ReactionRoleRow> = sqlx::query_as(
        "SELECT id, guild_id, channel_id, message_id, role_id, emoji
         FROM reaction_roles
         WHERE guild_id = $1 AND message_id = $2 AND emoji = $3",
    )
    .bind(guild_id_i64)
    .bind(message_id_i64)
    .bind(emoji)
    .fetch_optional(db.pool())
    .await?;

    row.map(ReactionRole::try_from).transpose()
}

pub async fn delete_reaction_role(
    db: &Database,
    guild_id: u64,
    message_id: u64,
    emoji: &str,
) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let message_id_i64 = i64::try_from(message_id).context("message_id out of i64 range")?;

    let deleted = sqlx::query(
        "DELETE FROM reaction_roles WHERE guild_id = $1 AND message_id = $2 AND emoji = $3",
    )
    .bind(guild_id_i64)
    .bind(message_id_i64)
    .bind(emoji)
    .execute(db.pool())
    .await?
    .rows_affected();

    Ok(deleted > 0)
}
