use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::guild_config;

/// Set the moderation-log channel (omit to disable logging)
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn modlogs(
    ctx: Context<'_>,
    #[description = "Channel receiving moderation logs"]
    #[channel_types("Text")]
    channel: Option<serenity::GuildChannel>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let channel_id = channel.as_ref().map(|c| c.id.get() as i64);
    guild_config::set_mod_logs_channel(&ctx.data().pool, guild_id.get() as i64, channel_id)
        .await?;

    let embed = match channel {
        Some(channel) => embeds::success_embed()
            .title("Moderation Logs Enabled")
            .description(format!("Moderation logs will be sent to <#{}>.", channel.id)),
        None => embeds::success_embed()
            .title("Moderation Logs Disabled")
            .description("Moderation logs are turned off."),
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
