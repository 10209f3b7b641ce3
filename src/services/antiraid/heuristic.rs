/// Account younger than this is kicked from level 2 up
pub const FRESH_ACCOUNT_SECS: u64 = 5 * 60;

/// Account younger than this is kicked from level 3 up
pub const YOUNG_ACCOUNT_SECS: u64 = 30 * 60;

/// Account younger than this is banned at level 4
pub const RECENT_ACCOUNT_SECS: u64 = 2 * 60 * 60;

/// Highest configurable protection level
pub const MAX_LEVEL: u8 = 4;

/// What the heuristic sees of a joining member.
#[derive(Debug, Clone, Copy)]
pub struct JoinProfile {
    pub account_age_secs: u64,
    pub name_has_invite: bool,
}

/// Actions to take on a join. Rules are cumulative and their actions union:
/// a single join can warrant both a kick and a ban (the kick rules of lower
/// levels keep firing at higher ones).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaidVerdict {
    pub kick: bool,
    pub ban: bool,
}

impl RaidVerdict {
    pub fn acted(&self) -> bool {
        self.kick || self.ban
    }
}

/// Score a member join against the guild's protection level.
///
/// Thresholds escalate strictly with the level; banning rules only apply
/// when the bot can ban.
pub fn evaluate_join(level: u8, profile: &JoinProfile, can_ban: bool) -> RaidVerdict {
    let mut verdict = RaidVerdict::default();
    if level == 0 {
        return verdict;
    }

    if profile.name_has_invite {
        verdict.kick = true;
    }

    if level >= 2 && profile.account_age_secs <= FRESH_ACCOUNT_SECS {
        verdict.kick = true;
    }

    if level >= 3 && can_ban {
        if profile.name_has_invite {
            verdict.ban = true;
        }
        if profile.account_age_secs <= YOUNG_ACCOUNT_SECS {
            verdict.kick = true;
        }
    }

    if level >= 4 {
        if profile.account_age_secs <= YOUNG_ACCOUNT_SECS {
            verdict.kick = true;
        }
        if can_ban && profile.account_age_secs <= RECENT_ACCOUNT_SECS {
            verdict.ban = true;
        }
    }

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(age_secs: u64, invite: bool) -> JoinProfile {
        JoinProfile {
            account_age_secs: age_secs,
            name_has_invite: invite,
        }
    }

    #[test]
    fn test_level_zero_never_acts() {
        let verdict = evaluate_join(0, &profile(0, true), true);
        assert!(!verdict.acted());
    }

    #[test]
    fn test_level_one_kicks_invite_names() {
        let verdict = evaluate_join(1, &profile(86400 * 365, true), true);
        assert_eq!(verdict, RaidVerdict { kick: true, ban: false });
    }

    #[test]
    fn test_level_two_kicks_fresh_accounts() {
        let verdict = evaluate_join(2, &profile(4 * 60, false), true);
        assert_eq!(verdict, RaidVerdict { kick: true, ban: false });

        // 6 minutes old is fine at level 2
        let verdict = evaluate_join(2, &profile(6 * 60, false), true);
        assert!(!verdict.acted());
    }

    #[test]
    fn test_level_three_bans_invite_names() {
        let verdict = evaluate_join(3, &profile(86400 * 365, true), true);
        assert!(verdict.ban);
    }

    #[test]
    fn test_level_three_needs_ban_permission() {
        let verdict = evaluate_join(3, &profile(86400 * 365, true), false);
        // Falls back to the level 1 kick only
        assert_eq!(verdict, RaidVerdict { kick: true, ban: false });
    }

    #[test]
    fn test_level_four_without_ban_permission_kicks_only() {
        let verdict = evaluate_join(4, &profile(10 * 60, false), false);
        assert_eq!(verdict, RaidVerdict { kick: true, ban: false });
    }

    #[test]
    fn test_level_four_bans_recent_accounts() {
        let verdict = evaluate_join(4, &profile(90 * 60, false), true);
        assert_eq!(verdict, RaidVerdict { kick: false, ban: true });
    }

    #[test]
    fn test_old_account_clean_name_passes() {
        for level in 0..=MAX_LEVEL {
            let verdict = evaluate_join(level, &profile(86400 * 365, false), true);
            assert!(!verdict.acted(), "level {} acted on a clean join", level);
        }
    }
}
