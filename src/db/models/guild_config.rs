use chrono::{DateTime, Utc};

use crate::services::moderation::hierarchy::SanctionAction;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuildConfig {
    pub guild_id: i64,
    pub muted_role_id: Option<i64>,
    pub mod_logs_channel_id: Option<i64>,
    pub antiraid_level: i32,
    pub kick_staff_roles: Option<String>,
    pub warn_staff_roles: Option<String>,
    pub mute_staff_roles: Option<String>,
    pub ban_staff_roles: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuildConfig {
    /// Role ids granting staff immunity against the given action.
    ///
    /// Stored as a semicolon-joined list, written by the dashboard.
    pub fn staff_role_ids(&self, action: SanctionAction) -> Vec<u64> {
        let raw = match action {
            SanctionAction::Kick => &self.kick_staff_roles,
            SanctionAction::Warn => &self.warn_staff_roles,
            SanctionAction::Mute => &self.mute_staff_roles,
            SanctionAction::Ban => &self.ban_staff_roles,
        };

        raw.as_deref()
            .unwrap_or("")
            .split(';')
            .filter_map(|s| s.trim().parse::<u64>().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_mute_roles(raw: Option<&str>) -> GuildConfig {
        GuildConfig {
            guild_id: 1,
            muted_role_id: None,
            mod_logs_channel_id: None,
            antiraid_level: 0,
            kick_staff_roles: None,
            warn_staff_roles: None,
            mute_staff_roles: raw.map(str::to_string),
            ban_staff_roles: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_staff_role_parsing() {
        let config = config_with_mute_roles(Some("123;456; 789"));
        assert_eq!(
            config.staff_role_ids(SanctionAction::Mute),
            vec![123, 456, 789]
        );
        assert!(config.staff_role_ids(SanctionAction::Ban).is_empty());
    }

    #[test]
    fn test_staff_role_parsing_garbage() {
        let config = config_with_mute_roles(Some("abc;;42"));
        assert_eq!(config.staff_role_ids(SanctionAction::Mute), vec![42]);
        assert!(config_with_mute_roles(None)
            .staff_role_ids(SanctionAction::Mute)
            .is_empty());
    }
}
