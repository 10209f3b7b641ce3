use std::fmt;

use chrono::{DateTime, Utc};

/// Kind of a moderation case, as stored in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "case_kind", rename_all = "lowercase")]
pub enum CaseKind {
    Kick,
    Warn,
    Mute,
    Tempmute,
    Unmute,
    Ban,
    Tempban,
    Softban,
    Unban,
}

impl CaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseKind::Kick => "kick",
            CaseKind::Warn => "warn",
            CaseKind::Mute => "mute",
            CaseKind::Tempmute => "tempmute",
            CaseKind::Unmute => "unmute",
            CaseKind::Ban => "ban",
            CaseKind::Tempban => "tempban",
            CaseKind::Softban => "softban",
            CaseKind::Unban => "unban",
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One permanent audit record of a moderation action.
///
/// Cases are created once and never mutated or deleted. The id comes from a
/// single database sequence, so it is unique and increasing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Case {
    pub id: i64,
    pub guild_id: i64,
    pub user_id: i64,
    pub moderator_id: i64,
    pub kind: CaseKind,
    pub reason: String,
    pub duration_seconds: Option<i64>,
    pub created_at: DateTime<Utc>,
}
