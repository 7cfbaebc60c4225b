#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelProfile {
    pub guild_id: u64,
    pub user_id: u64,
    pub xp: i64,
    pub level: i32,
    pub last_message: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XpAward {
    pub profile: LevelProfile,
    pub leveled_up: bool,
}

/// Level reached at `xp`: floor(sqrt(xp / 100)).
pub fn level_for_xp(xp: i64) -> i32 {
    if xp <= 0 {
        return 0;
    }

    let steps = xp / 100;
    let mut level = (steps as f64).sqrt() as i64;
    while level * level > steps {
        level -= 1;
    }
    while (level + 1) * (level + 1) <= steps {
        level += 1;
    }

    i32::try_from(level).unwrap_or(i32::MAX)
}

/// XP needed to reach `level`.
pub fn xp_for_level(level: i32) -> i64 {
    let level = i64::from(level.max(0));
    level.saturating_mul(level).saturating_mul(100)
}
