use std::sync::Arc;
use std::time::Duration;

use serenity::all::{GuildId, Http, UserId};
use tokio::time::interval;
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::limits::{EXPIRY_RETRY_BASE_SECONDS, EXPIRY_RETRY_MAX_SECONDS};
use crate::db::models::{ExpiryKind, PendingExpiry};
use crate::db::queries::expiry;
use crate::services::moderation::ban_service::{self, UnbanOutcome};
use crate::services::moderation::mute_service::{self, UnmuteOutcome};

/// Start the background loop that fires due temp-sanction reversals.
///
/// On the first tick after start-up, tasks whose due time passed while the
/// process was down fire immediately; a live task fires within one poll
/// cycle of its due time, never early.
pub fn spawn_expiry_scheduler(http: Arc<Http>, data: Arc<Data>, bot_id: UserId) {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(data.settings.expiry_poll_seconds));

        loop {
            ticker.tick().await;

            if let Err(e) = process_due_tasks(&http, &data, bot_id).await {
                error!("Error processing due expiries: {:?}", e);
            }
        }
    });
}

/// Delay before retrying a failed reversal, doubling per attempt up to the
/// cap. A task is never dropped on failure.
pub fn retry_delay(attempts: i32) -> i64 {
    let shift = attempts.clamp(0, 6) as u32;
    (EXPIRY_RETRY_BASE_SECONDS << shift).min(EXPIRY_RETRY_MAX_SECONDS)
}

async fn process_due_tasks(
    http: &Arc<Http>,
    data: &Arc<Data>,
    bot_id: UserId,
) -> Result<(), Error> {
    let due = expiry::list_due(&data.pool).await?;

    for task in due {
        if let Err(e) = fire_task(http, data, bot_id, &task).await {
            let delay = retry_delay(task.attempts);
            warn!(
                "{:?} reversal for user {} in guild {} failed, retrying in {}s: {:?}",
                task.task_kind, task.user_id, task.guild_id, delay, e
            );
            expiry::defer(
                &data.pool,
                task.task_kind,
                task.guild_id,
                task.user_id,
                delay,
            )
            .await?;
        }
    }

    Ok(())
}

async fn fire_task(
    http: &Arc<Http>,
    data: &Arc<Data>,
    bot_id: UserId,
    task: &PendingExpiry,
) -> Result<(), Error> {
    let guild_id = GuildId::new(task.guild_id as u64);
    let user_id = UserId::new(task.user_id as u64);

    let lock = data.target_lock(task.guild_id as u64, task.user_id as u64);
    let _guard = lock.lock().await;

    // A manual reversal may have consumed the task while we waited for the
    // lock; it must not fire twice
    if !expiry::exists(&data.pool, task.task_kind, task.guild_id, task.user_id).await? {
        return Ok(());
    }

    match task.task_kind {
        ExpiryKind::Unmute => {
            match mute_service::reverse_mute_locked(
                http,
                data,
                guild_id,
                user_id,
                bot_id,
                "Mute duration expired",
            )
            .await?
            {
                UnmuteOutcome::Reversed { .. } => {
                    info!(
                        "Scheduled unmute fired for user {} in guild {}",
                        user_id, guild_id
                    );
                }
                UnmuteOutcome::NotMuted => {
                    // Stale task: the mute record is already gone
                    expiry::remove(&data.pool, task.task_kind, task.guild_id, task.user_id)
                        .await?;
                }
            }
        }
        ExpiryKind::Unban => {
            match ban_service::reverse_ban_locked(
                http,
                data,
                guild_id,
                user_id,
                bot_id,
                "Ban duration expired",
            )
            .await?
            {
                UnbanOutcome::Reversed { .. } => {
                    info!(
                        "Scheduled unban fired for user {} in guild {}",
                        user_id, guild_id
                    );
                }
                UnbanOutcome::NotBanned => {
                    // Stale task: the ban was lifted outside the bot
                    expiry::remove(&data.pool, task.task_kind, task.guild_id, task.user_id)
                        .await?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles() {
        assert_eq!(retry_delay(0), 60);
        assert_eq!(retry_delay(1), 120);
        assert_eq!(retry_delay(2), 240);
    }

    #[test]
    fn test_retry_delay_capped() {
        assert_eq!(retry_delay(6), 3600);
        assert_eq!(retry_delay(100), 3600);
        assert_eq!(retry_delay(-3), 60);
    }
}
