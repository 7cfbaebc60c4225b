#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoRole {
    pub id: u64,
    pub guild_id: u64,
    pub role_id: u64,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionRole {
    pub id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub role_id: u64,
    pub emoji: String,
}

#[derive(Clone, Debug)]
pub struct NewReactionRole {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub role_id: u64,
    pub emoji: String,
}
