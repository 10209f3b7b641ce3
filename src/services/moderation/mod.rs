pub mod ban_service;
pub mod hierarchy;
pub mod mute_service;
pub mod notify;
pub mod staff;

use serenity::all::{GuildId, Member, UserId};
use serenity::http::{HttpError, StatusCode};
use tracing::warn;

use crate::bot::data::{Context, Data};
use crate::bot::error::Error;
use crate::db::models::CaseKind;
use crate::db::queries::case;
use crate::services::moderation::hierarchy::{
    can_sanction, DenyReason, SanctionAction, SanctionCheck,
};

/// True for API errors meaning the entity is already gone (member left,
/// role deleted, ban lifted). Reversal paths treat these as success.
pub(crate) fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp))
            if resp.status_code == StatusCode::NOT_FOUND
    )
}

/// Record a case in the sanction ledger, tolerating datastore failure.
///
/// The sanction itself must never be blocked by audit-trail unavailability:
/// a failed write is logged and reported as "case not saved" (None).
pub(crate) async fn record_case(
    data: &Data,
    guild_id: GuildId,
    user_id: UserId,
    moderator_id: UserId,
    kind: CaseKind,
    reason: &str,
    duration_seconds: Option<u64>,
) -> Option<i64> {
    match case::create(
        &data.pool,
        guild_id.get() as i64,
        user_id.get() as i64,
        moderator_id.get() as i64,
        kind,
        reason,
        duration_seconds.map(|d| d as i64),
    )
    .await
    {
        Ok(case) => Some(case.id),
        Err(e) => {
            warn!(
                "{} applied to user {} in guild {} but case not saved: {:?}",
                kind, user_id, guild_id, e
            );
            None
        }
    }
}

/// Gather the hierarchy snapshot for a command invocation and evaluate the
/// guard. Returns the denial reason, if any.
pub async fn check_sanction(
    ctx: Context<'_>,
    target: &Member,
    action: SanctionAction,
) -> Result<Option<DenyReason>, Error> {
    let serenity_ctx = ctx.serenity_context();
    let bot_id = serenity_ctx.cache.current_user().id;

    let actor = ctx
        .author_member()
        .await
        .ok_or_else(|| Error::custom("Could not resolve your guild membership"))?
        .into_owned();
    let bot_member = target.guild_id.member(serenity_ctx, bot_id).await?;

    let (actor_top, target_top, bot_top) = {
        let guild = ctx
            .guild()
            .ok_or_else(|| Error::custom("Guild not in cache"))?;
        let top = |m: &Member| {
            guild
                .member_highest_role(m)
                .map(|r| r.position)
                .unwrap_or(0)
        };
        (top(&actor), top(target), top(&bot_member))
    };

    let target_is_staff = match staff::is_staff_for(
        &ctx.data().pool,
        target.guild_id,
        &target.roles,
        action,
    )
    .await
    {
        Ok(staff) => staff,
        Err(e) => {
            // Degraded mode: datastore unreachable, native permissions stand in
            warn!(
                "Staff lookup failed for guild {}, falling back to native permissions: {}",
                target.guild_id, e
            );
            target
                .permissions(serenity_ctx)
                .map(|p| p.contains(action.native_permission()))
                .unwrap_or(false)
        }
    };

    let check = SanctionCheck {
        target_is_bot: target.user.id == bot_id,
        target_is_staff,
        actor_top_position: actor_top,
        target_top_position: target_top,
        bot_top_position: bot_top,
    };

    Ok(can_sanction(&check).err())
}
