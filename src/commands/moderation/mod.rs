pub mod ban;
pub mod cases;
pub mod kick;
pub mod mute;
pub mod softban;
pub mod warn;

use serenity::all::Permissions;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::services::moderation::hierarchy::DenyReason;
use crate::utils::sanitize::sanitize_reason;

pub(crate) const DEFAULT_REASON: &str = "No reason given";

/// Normalize a command reason: default text when omitted, mass mentions
/// neutralized unless the moderator may ping everyone.
pub(crate) async fn clean_reason(ctx: Context<'_>, reason: Option<String>) -> String {
    let raw = reason.unwrap_or_else(|| DEFAULT_REASON.to_string());

    let may_mention = match ctx.author_member().await {
        Some(member) => member
            .permissions(ctx.serenity_context())
            .map(|p| p.contains(Permissions::MENTION_EVERYONE))
            .unwrap_or(false),
        None => false,
    };

    sanitize_reason(&raw, may_mention)
}

pub(crate) async fn reply_denied(ctx: Context<'_>, deny: DenyReason) -> Result<(), Error> {
    let embed = embeds::warning_embed()
        .title("Sanction Refused")
        .description(deny.message());
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Reply with an expected-outcome notice (already muted, not banned, ...).
pub(crate) async fn reply_notice(
    ctx: Context<'_>,
    title: &str,
    description: impl Into<String>,
) -> Result<(), Error> {
    let embed = embeds::warning_embed()
        .title(title.to_string())
        .description(description.into());
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

pub(crate) async fn reply_success(
    ctx: Context<'_>,
    title: &str,
    description: impl Into<String>,
) -> Result<(), Error> {
    let embed = embeds::success_embed()
        .title(title.to_string())
        .description(description.into());
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Suffix describing the ledger outcome; a failed audit write is surfaced,
/// never hidden.
pub(crate) fn case_note(case_id: Option<i64>) -> String {
    match case_id {
        Some(id) => format!(" (case #{})", id),
        None => " (warning: the case could not be saved)".to_string(),
    }
}

pub(crate) fn guild_name(ctx: Context<'_>) -> String {
    ctx.guild()
        .map(|g| g.name.clone())
        .unwrap_or_else(|| "this server".to_string())
}
