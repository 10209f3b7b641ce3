use chrono::{DateTime, Utc};

/// A (guild, user) pair currently under a mute sanction.
///
/// This table is the authority for "is this member muted" - deliberately
/// decoupled from whether the muted role is still attached on Discord.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MuteRecord {
    pub guild_id: i64,
    pub user_id: i64,
    pub muted_at: DateTime<Utc>,
}
