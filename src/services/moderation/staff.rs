use serenity::all::{GuildId, RoleId};
use sqlx::PgPool;

use crate::db::queries::guild_config;
use crate::services::moderation::hierarchy::SanctionAction;

/// Whether the member holds a configured staff role for the given action.
///
/// Staff members are immune to that sanction. An `Err` means the datastore
/// is unreachable; callers fall back to native permission inspection.
pub async fn is_staff_for(
    pool: &PgPool,
    guild_id: GuildId,
    member_roles: &[RoleId],
    action: SanctionAction,
) -> Result<bool, sqlx::Error> {
    let Some(config) = guild_config::get(pool, guild_id.get() as i64).await? else {
        return Ok(false);
    };

    let staff_roles = config.staff_role_ids(action);
    Ok(member_roles.iter().any(|r| staff_roles.contains(&r.get())))
}
