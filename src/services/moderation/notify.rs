use serenity::all::{CreateMessage, Http, UserId};
use tracing::debug;

use crate::constants::embeds;

/// Best-effort DM to a member about a sanction, sent before the action
/// completes. Failure (closed DMs, blocked bot) never aborts the sanction.
/// Returns whether the notice was delivered.
pub async fn dm_sanction_notice(http: &Http, user_id: UserId, text: String) -> bool {
    let embed = embeds::info_embed().description(text);
    let message = CreateMessage::new().embed(embed);

    match user_id.create_dm_channel(http).await {
        Ok(dm_channel) => match dm_channel.send_message(http, message).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Could not DM user {}: {:?}", user_id, e);
                false
            }
        },
        Err(e) => {
            debug!("Could not create DM channel for user {}: {:?}", user_id, e);
            false
        }
    }
}
