use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::{
    case_note, clean_reason, guild_name, reply_denied, reply_notice, reply_success,
};
use crate::services::moderation::ban_service::{self, UnbanOutcome};
use crate::services::moderation::hierarchy::SanctionAction;
use crate::services::moderation::{self, notify};
use crate::services::modlog;
use crate::utils::duration::{format_duration, parse_duration};

/// Ban a user, optionally for a limited time
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "User to ban"] user: serenity::User,
    #[description = "Duration like 7d (omit for permanent)"] duration: Option<String>,
    #[description = "Days of message history to delete (0-7)"]
    #[min = 0]
    #[max = 7]
    days_to_delete: Option<u8>,
    #[description = "Reason for the ban"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let duration_seconds = match duration.as_deref().map(parse_duration).transpose() {
        Ok(d) => d,
        Err(msg) => return reply_notice(ctx, "Invalid Duration", msg).await,
    };

    let reason = clean_reason(ctx, reason).await;

    // The hierarchy only applies while the target is still a member; users
    // who already left can be banned by id
    if let Ok(target_member) = guild_id.member(ctx.serenity_context(), user.id).await {
        if let Some(deny) =
            moderation::check_sanction(ctx, &target_member, SanctionAction::Ban).await?
        {
            return reply_denied(ctx, deny).await;
        }
    }

    let notice = match duration_seconds {
        Some(d) => format!(
            "You have been banned from **{}** for {}.\nReason: {}",
            guild_name(ctx),
            format_duration(d),
            reason
        ),
        None => format!(
            "You have been banned from **{}**.\nReason: {}",
            guild_name(ctx),
            reason
        ),
    };
    notify::dm_sanction_notice(&ctx.serenity_context().http, user.id, notice).await;

    let case_id = ban_service::apply_ban(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        user.id,
        ctx.author().id,
        &reason,
        duration_seconds,
        days_to_delete,
    )
    .await?;

    let description = match duration_seconds {
        Some(d) => format!(
            "<@{}> has been banned for {}.{}",
            user.id,
            format_duration(d),
            case_note(case_id)
        ),
        None => format!("<@{}> has been banned.{}", user.id, case_note(case_id)),
    };

    modlog::send_mod_log(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        "Member banned",
        format!("{}\nReason: {}", description, reason),
        ctx.author().id,
    )
    .await;

    reply_success(ctx, "Member Banned", description).await
}

/// Unban a user
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "User to unban"] user: serenity::User,
    #[description = "Reason for the unban"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = clean_reason(ctx, reason).await;

    let outcome = ban_service::reverse_ban(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        user.id,
        ctx.author().id,
        &reason,
    )
    .await?;

    match outcome {
        UnbanOutcome::Reversed { case_id } => {
            modlog::send_mod_log(
                &ctx.serenity_context().http,
                ctx.data(),
                guild_id,
                "Member unbanned",
                format!(
                    "<@{}> was unbanned{}\nReason: {}",
                    user.id,
                    case_note(case_id),
                    reason
                ),
                ctx.author().id,
            )
            .await;

            reply_success(
                ctx,
                "Member Unbanned",
                format!("<@{}> has been unbanned.{}", user.id, case_note(case_id)),
            )
            .await
        }
        UnbanOutcome::NotBanned => {
            reply_notice(
                ctx,
                "Not Banned",
                format!("<@{}> is not in the ban list.", user.id),
            )
            .await
        }
    }
}
