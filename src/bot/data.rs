use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::config::Settings;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: PgPool,
    pub settings: Settings,
    /// Per-target mutexes serializing every mutating sanction operation on a
    /// given (guild_id, user_id) pair. A manual unmute and a concurrently
    /// firing scheduled unmute must never interleave.
    target_locks: DashMap<(u64, u64), Arc<Mutex<()>>>,
}

impl Data {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        Self {
            pool,
            settings,
            target_locks: DashMap::new(),
        }
    }

    /// Get the lock guarding mutations for a (guild, user) pair.
    ///
    /// Callers hold the returned mutex for the whole read-check-mutate
    /// sequence of a sanction or reversal.
    pub fn target_lock(&self, guild_id: u64, user_id: u64) -> Arc<Mutex<()>> {
        self.target_locks
            .entry((guild_id, user_id))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("target_locks_count", &self.target_locks.len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
