use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{
    ChannelId, ChannelType, GuildChannel, GuildId, Http, PermissionOverwrite,
    PermissionOverwriteType, Permissions, Role, RoleId,
};
use tracing::{debug, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::queries::guild_config;
use crate::services::moderation::mute_service;

/// Bring the guild's permission state in line with the muted role: ensure
/// the role exists, deny it "send messages" on every channel and category,
/// and strip contradicting "allow send" overwrites from other roles.
///
/// Best-effort bulk operation: each channel the bot cannot edit bumps the
/// failure count without aborting the rest. Returns the role id and how
/// many channels failed.
pub async fn reconcile(
    http: &Http,
    data: &Arc<Data>,
    guild_id: GuildId,
) -> Result<(RoleId, u32), Error> {
    let role_id = match mute_service::resolve_muted_role(http, data, guild_id).await? {
        Some(role_id) => role_id,
        None => mute_service::create_muted_role(http, data, guild_id).await?,
    };

    let roles = guild_id.roles(http).await?;
    let channels = guild_id.channels(http).await?;

    let categories: HashMap<ChannelId, &GuildChannel> = channels
        .values()
        .filter(|c| c.kind == ChannelType::Category)
        .map(|c| (c.id, c))
        .collect();

    let mut failed: u32 = 0;

    for channel in channels.values().filter(|c| c.kind != ChannelType::Category) {
        // Channels without role-specific overwrites, or whose overwrites
        // mirror their category, are covered by the category pass below
        let has_role_overwrites = channel
            .permission_overwrites
            .iter()
            .any(|o| matches!(o.kind, PermissionOverwriteType::Role(_)));
        if !has_role_overwrites || is_synced_with_parent(channel, &categories) {
            continue;
        }

        if let Err(e) = restrict_channel(http, channel, role_id, &roles).await {
            debug!(
                "Could not adjust overwrites on channel {}: {:?}",
                channel.id, e
            );
            failed += 1;
        }
    }

    for category in categories.values() {
        if let Err(e) = category
            .id
            .create_permission(http, deny_send_overwrite(role_id))
            .await
        {
            debug!(
                "Could not adjust overwrites on category {}: {:?}",
                category.id, e
            );
        }
    }

    guild_config::set_muted_role(
        &data.pool,
        guild_id.get() as i64,
        Some(role_id.get() as i64),
    )
    .await?;

    info!(
        "Reconciled muted role {} in guild {} ({} channels failed)",
        role_id, guild_id, failed
    );

    Ok((role_id, failed))
}

fn deny_send_overwrite(role_id: RoleId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::SEND_MESSAGES,
        kind: PermissionOverwriteType::Role(role_id),
    }
}

/// Deny sending for the muted role on one channel and clear contradicting
/// "allow send" overwrites on other roles, keeping integration-managed bot
/// roles untouched.
async fn restrict_channel(
    http: &Http,
    channel: &GuildChannel,
    muted_role: RoleId,
    roles: &HashMap<RoleId, Role>,
) -> Result<(), serenity::Error> {
    channel
        .id
        .create_permission(http, deny_send_overwrite(muted_role))
        .await?;

    for overwrite in &channel.permission_overwrites {
        let PermissionOverwriteType::Role(role_id) = overwrite.kind else {
            continue;
        };
        if role_id == muted_role {
            continue;
        }
        if roles.get(&role_id).is_some_and(|r| r.managed) {
            continue;
        }
        if overwrite.allow.contains(Permissions::SEND_MESSAGES) {
            channel
                .id
                .create_permission(
                    http,
                    PermissionOverwrite {
                        allow: overwrite.allow & !Permissions::SEND_MESSAGES,
                        deny: overwrite.deny,
                        kind: PermissionOverwriteType::Role(role_id),
                    },
                )
                .await?;
        }
    }

    Ok(())
}

fn is_synced_with_parent(
    channel: &GuildChannel,
    categories: &HashMap<ChannelId, &GuildChannel>,
) -> bool {
    let Some(parent) = channel.parent_id.and_then(|id| categories.get(&id)) else {
        return false;
    };
    same_overwrites(&channel.permission_overwrites, &parent.permission_overwrites)
}

fn same_overwrites(a: &[PermissionOverwrite], b: &[PermissionOverwrite]) -> bool {
    a.len() == b.len()
        && a.iter().all(|x| {
            b.iter()
                .any(|y| y.kind == x.kind && y.allow == x.allow && y.deny == x.deny)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overwrite(role: u64, allow: Permissions, deny: Permissions) -> PermissionOverwrite {
        PermissionOverwrite {
            allow,
            deny,
            kind: PermissionOverwriteType::Role(RoleId::new(role)),
        }
    }

    #[test]
    fn test_same_overwrites_order_independent() {
        let a = vec![
            overwrite(1, Permissions::empty(), Permissions::SEND_MESSAGES),
            overwrite(2, Permissions::SEND_MESSAGES, Permissions::empty()),
        ];
        let b = vec![a[1].clone(), a[0].clone()];
        assert!(same_overwrites(&a, &b));
    }

    #[test]
    fn test_same_overwrites_detects_difference() {
        let a = vec![overwrite(1, Permissions::empty(), Permissions::SEND_MESSAGES)];
        let b = vec![overwrite(1, Permissions::SEND_MESSAGES, Permissions::empty())];
        assert!(!same_overwrites(&a, &b));
        assert!(!same_overwrites(&a, &[]));
    }
}
