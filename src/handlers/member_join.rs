use std::sync::Arc;

use chrono::Utc;
use serenity::all::{Context, Member, Permissions};
use tracing::{debug, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::queries::{guild_config, mute};
use crate::services::antiraid::heuristic::{evaluate_join, JoinProfile, RaidVerdict};
use crate::services::moderation::mute_service;
use crate::services::modlog;
use crate::utils::invites::contains_invite_link;

/// Member-join pipeline: raid screening first, then re-application of the
/// muted role for members trying to shed a mute by rejoining.
pub async fn handle_member_join(
    ctx: &Context,
    data: &Arc<Data>,
    member: &Member,
) -> Result<(), Error> {
    let config = guild_config::get(&data.pool, member.guild_id.get() as i64).await?;
    let level = config.map(|c| c.antiraid_level).unwrap_or(0).clamp(0, 4) as u8;

    let verdict = screen_join(ctx, data, member, level).await?;
    if verdict.acted() {
        // The member is gone; nothing left to re-apply
        return Ok(());
    }

    if mute::is_muted(
        &data.pool,
        member.guild_id.get() as i64,
        member.user.id.get() as i64,
    )
    .await?
    {
        reapply_muted_role(ctx, data, member).await;
    }

    Ok(())
}

/// Evaluate the raid heuristic and apply its verdict. The heuristic only
/// runs when the bot can kick at all.
async fn screen_join(
    ctx: &Context,
    data: &Arc<Data>,
    member: &Member,
    level: u8,
) -> Result<RaidVerdict, Error> {
    if level == 0 {
        return Ok(RaidVerdict::default());
    }

    let bot_id = ctx.cache.current_user().id;
    let bot_member = member.guild_id.member(ctx, bot_id).await?;
    let perms = bot_member
        .permissions(ctx)
        .unwrap_or(Permissions::empty());

    if !perms.kick_members() {
        return Ok(RaidVerdict::default());
    }

    let account_age_secs =
        (Utc::now().timestamp() - member.user.id.created_at().unix_timestamp()).max(0) as u64;
    let profile = JoinProfile {
        account_age_secs,
        name_has_invite: contains_invite_link(&member.user.name),
    };

    let verdict = evaluate_join(level, &profile, perms.ban_members());

    if verdict.kick {
        if let Err(e) = member
            .guild_id
            .kick_with_reason(&ctx.http, member.user.id, "Raid protection")
            .await
        {
            debug!("Raid kick of {} failed: {:?}", member.user.id, e);
        }
    }
    if verdict.ban {
        if let Err(e) = member
            .guild_id
            .ban_with_reason(&ctx.http, member.user.id, 0, "Raid protection")
            .await
        {
            debug!("Raid ban of {} failed: {:?}", member.user.id, e);
        }
    }

    if verdict.acted() {
        info!(
            "Raid protection acted on {} in guild {} (level {}, age {}s, kick: {}, ban: {})",
            member.user.id, member.guild_id, level, account_age_secs, verdict.kick, verdict.ban
        );
        modlog::send_mod_log(
            &ctx.http,
            data,
            member.guild_id,
            "Raid protection",
            format!(
                "<@{}> was screened on join (account age {}s, kicked: {}, banned: {})",
                member.user.id, account_age_secs, verdict.kick, verdict.ban
            ),
            bot_id,
        )
        .await;
    }

    Ok(verdict)
}

/// Put the muted role back on a muted member who rejoined. Best-effort:
/// the mute record stays authoritative even if the role cannot be attached.
async fn reapply_muted_role(ctx: &Context, data: &Arc<Data>, member: &Member) {
    match mute_service::resolve_muted_role(&ctx.http, data, member.guild_id).await {
        Ok(Some(role_id)) => {
            match ctx
                .http
                .add_member_role(
                    member.guild_id,
                    member.user.id,
                    role_id,
                    Some("Muted member rejoined"),
                )
                .await
            {
                Ok(()) => info!(
                    "Re-applied muted role to {} rejoining guild {}",
                    member.user.id, member.guild_id
                ),
                Err(e) => debug!(
                    "Could not re-apply muted role to {} in guild {}: {:?}",
                    member.user.id, member.guild_id, e
                ),
            }
        }
        Ok(None) => {}
        Err(e) => warn!(
            "Could not resolve muted role for guild {}: {:?}",
            member.guild_id, e
        ),
    }
}
