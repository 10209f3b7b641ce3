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

/// Kick a member and purge their recent messages (ban + immediate unban)
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn softban(
    ctx: Context<'_>,
    #[description = "Member to softban"] member: serenity::Member,
    #[description = "Reason for the softban"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = clean_reason(ctx, reason).await;

    // Softban shares the kick rules: it removes the member, it does not
    // keep them out
    if let Some(deny) = moderation::check_sanction(ctx, &member, SanctionAction::Kick).await? {
        return reply_denied(ctx, deny).await;
    }

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
        .ban_with_reason(ctx.serenity_context(), member.user.id, 7, &reason)
        .await?;
    ctx.serenity_context()
        .http
        .remove_ban(guild_id, member.user.id, Some("Softban"))
        .await?;

    let case_id = moderation::record_case(
        ctx.data(),
        guild_id,
        member.user.id,
        ctx.author().id,
        CaseKind::Softban,
        &reason,
        None,
    )
    .await;

    modlog::send_mod_log(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        "Member softbanned",
        format!(
            "<@{}> was softbanned{}\nReason: {}",
            member.user.id,
            case_note(case_id),
            reason
        ),
        ctx.author().id,
    )
    .await;

    reply_success(
        ctx,
        "Member Softbanned",
        format!(
            "<@{}> has been kicked and their recent messages purged.{}",
            member.user.id,
            case_note(case_id)
        ),
    )
    .await
}
