use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::guild_config;
use crate::services::antiraid::heuristic::MAX_LEVEL;

/// Show or set the anti-raid protection level (0-4)
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn antiraid(
    ctx: Context<'_>,
    #[description = "New protection level"]
    #[min = 0]
    #[max = 4]
    level: Option<u8>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let embed = match level {
        Some(level) => {
            let level = level.min(MAX_LEVEL);
            guild_config::set_antiraid_level(
                &ctx.data().pool,
                guild_id.get() as i64,
                level as i32,
            )
            .await?;

            embeds::success_embed()
                .title("Anti-Raid Updated")
                .description(format!("Join screening is now at level {}.", level))
        }
        None => {
            let current = guild_config::get(&ctx.data().pool, guild_id.get() as i64)
                .await?
                .map(|c| c.antiraid_level)
                .unwrap_or(0);

            embeds::info_embed()
                .title("Anti-Raid Level")
                .description(format!(
                    "Join screening is at level {} (0 = off, {} = strictest).",
                    current, MAX_LEVEL
                ))
        }
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
