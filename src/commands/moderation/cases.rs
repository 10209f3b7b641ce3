use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::commands::moderation::reply_notice;
use crate::constants::embeds;
use crate::db::queries::case;

/// Look up the moderation history of a user
#[poise::command(slash_command, guild_only, required_permissions = "KICK_MEMBERS")]
pub async fn cases(
    ctx: Context<'_>,
    #[description = "User to look up"] user: serenity::User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let total = case::count_for_user(
        &ctx.data().pool,
        guild_id.get() as i64,
        user.id.get() as i64,
    )
    .await?;

    if total == 0 {
        return reply_notice(
            ctx,
            "No Cases",
            format!("<@{}> has no recorded cases.", user.id),
        )
        .await;
    }

    let recent = case::list_for_user(
        &ctx.data().pool,
        guild_id.get() as i64,
        user.id.get() as i64,
        10,
    )
    .await?;

    let lines: Vec<String> = recent
        .iter()
        .map(|c| {
            format!(
                "`#{}` **{}**: {} (<t:{}:R>)",
                c.id,
                c.kind,
                c.reason,
                c.created_at.timestamp()
            )
        })
        .collect();

    let embed = embeds::info_embed()
        .title(format!("Cases for {}", user.name))
        .description(format!("{}\n\n{} case(s) total", lines.join("\n"), total));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
