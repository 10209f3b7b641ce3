use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::{
    case_note, clean_reason, guild_name, reply_denied, reply_notice, reply_success,
};
use crate::db::models::CaseKind;
use crate::services::moderation::hierarchy::SanctionAction;
use crate::services::moderation::{self, notify};
use crate::services::modlog;

/// Send a warning to a member and record it
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS"
)]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "Member to warn"] member: serenity::Member,
    #[description = "Warning message"] message: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if member.user.bot {
        return reply_notice(ctx, "Cannot Warn Bots", "Bots do not read warnings.").await;
    }

    let message = clean_reason(ctx, Some(message)).await;

    if let Some(deny) = moderation::check_sanction(ctx, &member, SanctionAction::Warn).await? {
        return reply_denied(ctx, deny).await;
    }

    let delivered = notify::dm_sanction_notice(
        &ctx.serenity_context().http,
        member.user.id,
        format!(
            "You received a warning in **{}**.\nReason: {}",
            guild_name(ctx),
            message
        ),
    )
    .await;

    let case_id = moderation::record_case(
        ctx.data(),
        guild_id,
        member.user.id,
        ctx.author().id,
        CaseKind::Warn,
        &message,
        None,
    )
    .await;

    modlog::send_mod_log(
        &ctx.serenity_context().http,
        ctx.data(),
        guild_id,
        "Member warned",
        format!(
            "<@{}> was warned{}\nReason: {}",
            member.user.id,
            case_note(case_id),
            message
        ),
        ctx.author().id,
    )
    .await;

    let mut description = format!(
        "<@{}> has been warned.{}",
        member.user.id,
        case_note(case_id)
    );
    if !delivered {
        description.push_str("\nThe member could not be notified (DMs closed).");
    }

    reply_success(ctx, "Member Warned", description).await
}
