use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::services::muted_role::provisioner;

/// Set up the muted role and synchronize its channel permissions
#[poise::command(
    slash_command,
    rename = "mute-config",
    guild_only,
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn mute_config(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    // Walking every channel takes longer than the interaction timeout
    ctx.defer().await?;

    let (role_id, failed) =
        provisioner::reconcile(&ctx.serenity_context().http, ctx.data(), guild_id).await?;

    let embed = if failed == 0 {
        embeds::success_embed()
            .title("Muted Role Configured")
            .description(format!(
                "<@&{}> is set up and denied sending in every channel.",
                role_id
            ))
    } else {
        embeds::warning_embed()
            .title("Muted Role Partially Configured")
            .description(format!(
                "<@&{}> is set up, but {} channel(s) could not be updated (missing permissions).",
                role_id, failed
            ))
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
