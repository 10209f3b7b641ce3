use std::sync::Arc;

use serenity::all::{Ban, GuildId, Http, UserId};
use tracing::info;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::limits::MAX_DELETE_MESSAGE_DAYS;
use crate::db::models::{CaseKind, ExpiryKind};
use crate::db::queries::expiry;
use crate::services::moderation::{is_not_found, record_case};

/// Result of an unban request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnbanOutcome {
    Reversed { case_id: Option<i64> },
    /// The user is not in the guild's ban list; nothing to reverse.
    NotBanned,
}

/// Clamp the "days of message history to delete" parameter to what Discord
/// accepts.
pub fn clamp_delete_days(days: Option<u8>) -> u8 {
    days.unwrap_or(0).min(MAX_DELETE_MESSAGE_DAYS)
}

/// Ban a user, record the case, and schedule the unban when a duration is
/// given. Unlike mutes, "currently banned" is queried from the platform's
/// ban list, never duplicated locally.
#[allow(clippy::too_many_arguments)]
pub async fn apply_ban(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    moderator_id: UserId,
    reason: &str,
    duration_seconds: Option<u64>,
    delete_message_days: Option<u8>,
) -> Result<Option<i64>, Error> {
    let lock = data.target_lock(guild_id.get(), user_id.get());
    let _guard = lock.lock().await;

    let days = clamp_delete_days(delete_message_days);
    guild_id
        .ban_with_reason(http, user_id, days, reason)
        .await?;

    let kind = if duration_seconds.is_some() {
        CaseKind::Tempban
    } else {
        CaseKind::Ban
    };
    let case_id = record_case(
        data,
        guild_id,
        user_id,
        moderator_id,
        kind,
        reason,
        duration_seconds,
    )
    .await;

    if let Some(duration) = duration_seconds {
        expiry::upsert(
            &data.pool,
            ExpiryKind::Unban,
            guild_id.get() as i64,
            user_id.get() as i64,
            duration as i64,
        )
        .await?;
    }

    info!(
        "User {} banned user {} in guild {} (duration: {:?}s, deleted {} days of messages)",
        moderator_id, user_id, guild_id, duration_seconds, days
    );

    Ok(case_id)
}

/// Unban a user. Idempotent: safe to call from both the manual command and
/// the expiry scheduler.
pub async fn reverse_ban(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    actor_id: UserId,
    reason: &str,
) -> Result<UnbanOutcome, Error> {
    let lock = data.target_lock(guild_id.get(), user_id.get());
    let _guard = lock.lock().await;

    reverse_ban_locked(http, data, guild_id, user_id, actor_id, reason).await
}

/// Unban body, called with the per-target lock already held.
pub(crate) async fn reverse_ban_locked(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    actor_id: UserId,
    reason: &str,
) -> Result<UnbanOutcome, Error> {
    if find_ban(http, guild_id, user_id).await?.is_none() {
        return Ok(UnbanOutcome::NotBanned);
    }

    match http.remove_ban(guild_id, user_id, Some(reason)).await {
        Ok(()) => {}
        // Lifted between the list fetch and the call: same outcome
        Err(e) if is_not_found(&e) => {}
        Err(e) => return Err(Error::Serenity(e)),
    }

    expiry::remove(
        &data.pool,
        ExpiryKind::Unban,
        guild_id.get() as i64,
        user_id.get() as i64,
    )
    .await?;

    let case_id = record_case(
        data,
        guild_id,
        user_id,
        actor_id,
        CaseKind::Unban,
        reason,
        None,
    )
    .await;

    info!("User {} unbanned user {} in guild {}", actor_id, user_id, guild_id);

    Ok(UnbanOutcome::Reversed { case_id })
}

/// Look up a user in the guild's ban list.
pub async fn find_ban(
    http: &Http,
    guild_id: GuildId,
    user_id: UserId,
) -> Result<Option<Ban>, Error> {
    let bans = guild_id.bans(http, None, None).await?;
    Ok(bans.into_iter().find(|b| b.user.id == user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_delete_days() {
        assert_eq!(clamp_delete_days(None), 0);
        assert_eq!(clamp_delete_days(Some(3)), 3);
        assert_eq!(clamp_delete_days(Some(7)), 7);
        assert_eq!(clamp_delete_days(Some(200)), 7);
    }
}
