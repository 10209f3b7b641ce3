use serenity::all::{ChannelId, CreateEmbedFooter, CreateMessage, GuildId, Http, UserId};
use tracing::debug;

use crate::bot::data::Data;
use crate::constants::embeds;
use crate::db::queries::guild_config;

/// Send an entry to the guild's moderation-log channel, if one is
/// configured. Fire-and-forget: every failure is logged and swallowed, the
/// calling state transition never depends on it.
pub async fn send_mod_log(
    http: &Http,
    data: &Data,
    guild_id: GuildId,
    title: &str,
    description: String,
    actor_id: UserId,
) {
    let channel_id = match guild_config::get(&data.pool, guild_id.get() as i64).await {
        Ok(config) => config.and_then(|c| c.mod_logs_channel_id),
        Err(e) => {
            debug!("Could not load mod-log config for guild {}: {:?}", guild_id, e);
            return;
        }
    };

    let Some(channel_id) = channel_id else {
        return;
    };

    let embed = embeds::info_embed()
        .title(title.to_string())
        .description(description)
        .footer(CreateEmbedFooter::new(format!("Actor: {}", actor_id)));
    let message = CreateMessage::new().embed(embed);

    if let Err(e) = ChannelId::new(channel_id as u64)
        .send_message(http, message)
        .await
    {
        debug!("Could not send mod log in guild {}: {:?}", guild_id, e);
    }
}
