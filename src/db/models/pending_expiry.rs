use chrono::{DateTime, Utc};

/// Kind of a scheduled reversal task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "expiry_kind", rename_all = "lowercase")]
pub enum ExpiryKind {
    Unmute,
    Unban,
}

/// A pending reversal of a temp-sanction.
///
/// At most one row exists per (task_kind, guild_id, user_id); re-scheduling
/// replaces the due time. Rows are removed on confirmed success or manual
/// cancellation only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PendingExpiry {
    pub task_kind: ExpiryKind,
    pub guild_id: i64,
    pub user_id: i64,
    pub due_at: DateTime<Utc>,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
}
