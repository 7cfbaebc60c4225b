use anyhow::Context as _;

use crate::{
    database::Database,
    model::leveling::{LevelProfile, XpAward, level_for_xp, xp_for_level},
};

#[derive(sqlx::FromRow)]
struct LevelRow {
    guild_id: i64,
    user_id: i64,
    xp: i64,
    level: i32,
    last_message: i64,
}

impl TryFrom<LevelRow> for LevelProfile {
    type Error = anyhow::Error;

    fn try_from(row: LevelRow) -> anyhow::Result<Self> {
        Ok(Self {
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            xp: row.xp,
            level: row.level,
            last_message: u64::try_from(row.last_message)
                .context("last_message row out of u64 range")?,
        })
    }
}

pub async fn level_profile(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Option<LevelProfile>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: Option<LevelRow> = sqlx::query_as(
        "SELECT guild_id, user_id, xp, level, last_message
         FROM levels
         WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(LevelProfile::try_from).transpose()
}

pub async fn add_xp(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    amount: i64,
    now: u64,
) -> anyhow::Result<XpAward> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;

    let row: LevelRow = sqlx::query_as(
        "INSERT INTO levels (guild_id, user_id, xp, level, last_message)
         VALUES ($1, $2, $3, 0, $4)
         ON CONFLICT (guild_id, user_id) DO UPDATE SET
            xp = levels.xp + EXCLUDED.xp,
            last_message = EXCLUDED.last_message
         RETURNING guild_id, user_id, xp, level, last_message",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(amount)
    .bind(now_i64)
    .fetch_one(db.pool())
    .await?;

    let mut profile = LevelProfile::try_from(row)?;
    let new_level = level_for_xp(profile.xp);
    let leveled_up = new_level > profile.level;

    if new_level != profile.level {
        sqlx::query("UPDATE levels SET level = $3 WHERE guild_id = $1 AND user_id = $2")
            .bind(guild_id_i64)
            .bind(user_id_i64)
            .bind(new_level)
            .execute(db.pool())
            .await?;
        profile.level = new_level;
    }

    Ok(XpAward {
        profile,
        leveled_up,
    })
}

/// Force a member to the start of `level`.
pub async fn set_level(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    level: i32,
    now: u64,
) -> anyhow::Result<LevelProfile> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;
    let level = level.max(0);

    let row: LevelRow = sqlx::query_as(
        "INSERT INTO levels (guild_id, user_id, xp, level, last_message)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (guild_id, user_id) DO UPDATE SET
            xp = EXCLUDED.xp,
            level = EXCLUDED.level
         RETURNING guild_id, user_id, xp, level, last_message",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(xp_for_level(level))
    .bind(level)
    .bind(now_i64)
    .fetch_one(db.pool())
    .await?;

    LevelProfile::try_from(row)
}

pub async fn level_leaderboard(
    db: &Database,
    guild_id: u64,
    limit: u32,
) -> anyhow::Result<Vec<LevelProfile>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let rows: Vec<LevelRow> = sqlx::query_as(
        "SELECT guild_id, user_id, xp, level, last_message
         FROM levels
         WHERE guild_id = $1
         ORDER BY xp DESC, user_id ASC
         LIMIT $2",
    )
    .bind(guild_id_i64)
    .bind(i64::from(limit))
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(LevelProfile::try_from).collect()
}
