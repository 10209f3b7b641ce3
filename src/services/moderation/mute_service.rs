use std::sync::Arc;

use serenity::all::{EditRole, GuildId, Http, Permissions, RoleId, UserId};
use tracing::{info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::limits::MUTED_ROLE_NAME;
use crate::db::models::{CaseKind, ExpiryKind};
use crate::db::queries::{expiry, guild_config, mute};
use crate::services::moderation::{is_not_found, record_case};

/// Result of a mute request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteOutcome {
    /// Role assigned and mute recorded. `case_id` is None when the sanction
    /// applied but the ledger write failed.
    Applied { case_id: Option<i64> },
    AlreadyMuted,
    /// No configured muted role, no role named "muted", and the caller did
    /// not ask for auto-creation.
    NoMutedRole,
}

/// Result of an unmute request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmuteOutcome {
    Reversed { case_id: Option<i64> },
    NotMuted,
}

/// Mute a member: assign the muted role, record the case, mark the member
/// muted, and schedule the reversal when a duration is given.
#[allow(clippy::too_many_arguments)]
pub async fn apply_mute(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    moderator_id: UserId,
    reason: &str,
    duration_seconds: Option<u64>,
    create_role_if_missing: bool,
) -> Result<MuteOutcome, Error> {
    let lock = data.target_lock(guild_id.get(), user_id.get());
    let _guard = lock.lock().await;

    if mute::is_muted(&data.pool, guild_id.get() as i64, user_id.get() as i64).await? {
        return Ok(MuteOutcome::AlreadyMuted);
    }

    let role_id = match resolve_muted_role(http, data, guild_id).await? {
        Some(role_id) => role_id,
        None if create_role_if_missing => create_muted_role(http, data, guild_id).await?,
        None => return Ok(MuteOutcome::NoMutedRole),
    };

    http.add_member_role(guild_id, user_id, role_id, Some(reason))
        .await?;

    let kind = if duration_seconds.is_some() {
        CaseKind::Tempmute
    } else {
        CaseKind::Mute
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

    mute::upsert(&data.pool, guild_id.get() as i64, user_id.get() as i64).await?;

    if let Some(duration) = duration_seconds {
        expiry::upsert(
            &data.pool,
            ExpiryKind::Unmute,
            guild_id.get() as i64,
            user_id.get() as i64,
            duration as i64,
        )
        .await?;
    }

    info!(
        "User {} muted user {} in guild {} (duration: {:?}s)",
        moderator_id, user_id, guild_id, duration_seconds
    );

    Ok(MuteOutcome::Applied { case_id })
}

/// Unmute a member. Idempotent: safe to call from both the manual command
/// and the expiry scheduler.
pub async fn reverse_mute(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    actor_id: UserId,
    reason: &str,
) -> Result<UnmuteOutcome, Error> {
    let lock = data.target_lock(guild_id.get(), user_id.get());
    let _guard = lock.lock().await;

    reverse_mute_locked(http, data, guild_id, user_id, actor_id, reason).await
}

/// Unmute body, called with the per-target lock already held.
pub(crate) async fn reverse_mute_locked(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    actor_id: UserId,
    reason: &str,
) -> Result<UnmuteOutcome, Error> {
    if !mute::is_muted(&data.pool, guild_id.get() as i64, user_id.get() as i64).await? {
        return Ok(UnmuteOutcome::NotMuted);
    }

    // Role removal is best-effort against drift: the member may have left or
    // the role may have been deleted since the mute was applied.
    if let Some(role_id) = resolve_muted_role(http, data, guild_id).await? {
        match http
            .remove_member_role(guild_id, user_id, role_id, Some(reason))
            .await
        {
            Ok(()) => {}
            Err(e) if is_not_found(&e) => {}
            Err(e) => return Err(Error::Serenity(e)),
        }
    }

    mute::remove(&data.pool, guild_id.get() as i64, user_id.get() as i64).await?;

    // Cancel any scheduled unmute so the scheduler never fires a stale
    // reversal on a member re-muted later for unrelated reasons
    expiry::remove(
        &data.pool,
        ExpiryKind::Unmute,
        guild_id.get() as i64,
        user_id.get() as i64,
    )
    .await?;

    let case_id = record_case(
        data,
        guild_id,
        user_id,
        actor_id,
        CaseKind::Unmute,
        reason,
        None,
    )
    .await;

    info!("User {} unmuted user {} in guild {}", actor_id, user_id, guild_id);

    Ok(UnmuteOutcome::Reversed { case_id })
}

/// Resolve the guild's muted role: the configured id if it still exists,
/// else a role literally named "muted", else none.
pub async fn resolve_muted_role(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
) -> Result<Option<RoleId>, Error> {
    let config = guild_config::get(&data.pool, guild_id.get() as i64).await?;
    let roles = guild_id.roles(http).await?;

    if let Some(configured) = config.and_then(|c| c.muted_role_id) {
        let role_id = RoleId::new(configured as u64);
        if roles.contains_key(&role_id) {
            return Ok(Some(role_id));
        }
        warn!(
            "Configured muted role {} no longer exists in guild {}",
            role_id, guild_id
        );
    }

    Ok(roles
        .values()
        .find(|r| r.name.eq_ignore_ascii_case(MUTED_ROLE_NAME))
        .map(|r| r.id))
}

/// Create a bare muted role and persist its id. The full per-channel
/// overwrite synchronization is the provisioner's job.
pub(crate) async fn create_muted_role(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
) -> Result<RoleId, Error> {
    let role = guild_id
        .create_role(
            http,
            EditRole::new()
                .name(MUTED_ROLE_NAME)
                .permissions(Permissions::empty()),
        )
        .await?;

    guild_config::set_muted_role(
        &data.pool,
        guild_id.get() as i64,
        Some(role.id.get() as i64),
    )
    .await?;

    info!("Created muted role {} in guild {}", role.id, guild_id);

    Ok(role.id)
}
