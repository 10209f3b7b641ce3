use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::{
    case_note, clean_reason, guild_name, reply_denied, reply_notice, reply_success,
};
use crate::db::queries::mute as mute_query;
use crate::services::moderation::hierarchy::SanctionAction;
use crate::services::moderation::mute_service::{self, MuteOutcome, UnmuteOutcome};
use crate::services::moderation::{self, notify};
use crate::services::modlog;
use crate::utils::duration::{format_duration, parse_duration};

/// Mute a member, optionally for a limited time
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "Member to mute"] member: serenity::Member,
    #[description = "Duration like 1d3h (omit for permanent)"] duration: Option<String>,
    #[description = "Reason for the mute"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let duration_seconds = match duration.as_deref().map(parse_duration).transpose() {
        Ok(d) => d,
        Err(msg) => return reply_notice(ctx, "Invalid Duration", msg).await,
    };

    let reason = clean_reason(ctx, reason).await;

    if let Some(deny) = moderation::check_sanction(ctx, &member, SanctionAction::Mute).await? {
        return reply_denied(ctx, deny).await;
    }

    // Fast path before DMing; the service re-checks under the lock
    if mute_query::is_muted(
        &ctx.data().pool,
        guild_id.get() as i64,
        member.user.id.get() as i64,
    )
    .await?
    {
        return reply_notice(
            ctx,
            "Already Muted",
            format!("<@{}> is already muted.", member.user.id),
        )
        .await;
    }

    let notice = match duration_seconds {
        Some(d) => format!(
            "You have been muted in **{}** for {}.\nReason: {}",
            guild_name(ctx),
            format_duration(d),
            reason
        ),
        None => format!(
            "You have been muted in **{}**.\nReason: {}",
            guild_name(ctx),
            reason
        ),
    };
    notify::dm_sanction_notice(&ctx.serenity_context().http, member.user.id, notice).await;

    let outcome = mute_service::apply_mute(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        member.user.id,
        ctx.author().id,
        &reason,
        duration_seconds,
        true,
    )
    .await?;

    match outcome {
        MuteOutcome::Applied { case_id } => {
            let description = match duration_seconds {
                Some(d) => format!(
                    "<@{}> has been muted for {}.{}",
                    member.user.id,
                    format_duration(d),
                    case_note(case_id)
                ),
                None => format!(
                    "<@{}> has been muted.{}",
                    member.user.id,
                    case_note(case_id)
                ),
            };

            modlog::send_mod_log(
                &ctx.serenity_context().http,
                ctx.data(),
                guild_id,
                "Member muted",
                format!("{}\nReason: {}", description, reason),
                ctx.author().id,
            )
            .await;

            reply_success(ctx, "Member Muted", description).await
        }
        MuteOutcome::AlreadyMuted => {
            reply_notice(
                ctx,
                "Already Muted",
                format!("<@{}> is already muted.", member.user.id),
            )
            .await
        }
        MuteOutcome::NoMutedRole => {
            reply_notice(
                ctx,
                "No Muted Role",
                "No muted role is configured. Run /mute-config to set one up.",
            )
            .await
        }
    }
}

/// Unmute a member
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "Member to unmute"] member: serenity::Member,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let outcome = mute_service::reverse_mute(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        member.user.id,
        ctx.author().id,
        "Unmuted by moderator",
    )
    .await?;

    match outcome {
        UnmuteOutcome::Reversed { case_id } => {
            modlog::send_mod_log(
                &ctx.serenity_context().http,
                ctx.data(),
                guild_id,
                "Member unmuted",
                format!("<@{}> was unmuted{}", member.user.id, case_note(case_id)),
                ctx.author().id,
            )
            .await;

            reply_success(
                ctx,
                "Member Unmuted",
                format!(
                    "<@{}> has been unmuted.{}",
                    member.user.id,
                    case_note(case_id)
                ),
            )
            .await
        }
        UnmuteOutcome::NotMuted => {
            reply_notice(
                ctx,
                "Not Muted",
                format!("<@{}> is not muted.", member.user.id),
            )
            .await
        }
    }
}
