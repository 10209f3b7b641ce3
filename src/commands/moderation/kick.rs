use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::{
    case_note, clean_reason, guild_name, reply_denied, reply_success,
};
use crate::db::models::CaseKind;
use crate::services::moderation::hierarchy::SanctionAction;
use crate::services::moderation::{self, notify};
use crate::services::modlog;

/// Kick a member from the server
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "KICK_MEMBERS"
)]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Member to kick"] member: serenity::Member,
    #[description = "Reason for the kick"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = clean_reason(ctx, reason).await;

    if let Some(deny) = moderation::check_sanction(ctx, &member, SanctionAction::Kick).await? {
        return reply_denied(ctx, deny).await;
    }

    // DM while a shared guild still exists
    notify::dm_sanction_notice(
        &ctx.serenity_context().http,
        member.user.id,
        format!(
            "You have been kicked from **{}**.\nReason: {}",
            guild_name(ctx),
            reason
        ),
    )
    .await;

    guild_id
        .kick_with_reason(ctx.serenity_context(), member.user.id, &reason)
        .await?;

    let case_id = moderation::record_case(
        ctx.data(),
        guild_id,
        member.user.id,
        ctx.author().id,
        CaseKind::Kick,
        &reason,
        None,
    )
    .await;

    modlog::send_mod_log(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        "Member kicked",
        format!(
            "<@{}> was kicked{}\nReason: {}",
            member.user.id,
            case_note(case_id),
            reason
        ),
        ctx.author().id,
    )
    .await;

    reply_success(
        ctx,
        "Member Kicked",
        format!("<@{}> has been kicked.{}", member.user.id, case_note(case_id)),
    )
    .await
}
