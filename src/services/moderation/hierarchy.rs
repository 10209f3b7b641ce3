use serenity::all::Permissions;

/// Sanction kinds the hierarchy guard distinguishes. Softban shares the kick
/// rules, tempmute/tempban share mute/ban.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanctionAction {
    Kick,
    Warn,
    Mute,
    Ban,
}

impl SanctionAction {
    /// The native Discord permission consulted when the staff-immunity
    /// lookup is unavailable (degraded mode).
    pub fn native_permission(&self) -> Permissions {
        match self {
            SanctionAction::Kick => Permissions::KICK_MEMBERS,
            SanctionAction::Warn => Permissions::MANAGE_ROLES,
            SanctionAction::Mute => Permissions::MANAGE_ROLES,
            SanctionAction::Ban => Permissions::BAN_MEMBERS,
        }
    }
}

/// Snapshot of the state the guard evaluates. Gathered by the caller so the
/// decision itself stays a pure function.
#[derive(Debug, Clone, Copy)]
pub struct SanctionCheck {
    pub target_is_bot: bool,
    pub target_is_staff: bool,
    pub actor_top_position: u16,
    pub target_top_position: u16,
    pub bot_top_position: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    TargetIsBot,
    StaffProtected,
    AboveActor,
    AboveBot,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::TargetIsBot => "I am not going to sanction myself.",
            DenyReason::StaffProtected => {
                "This member is staff for this action and cannot be sanctioned."
            }
            DenyReason::AboveActor => {
                "You cannot sanction a member ranked at or above you."
            }
            DenyReason::AboveBot => {
                "I cannot act on a member ranked at or above my highest role."
            }
        }
    }
}

/// Decide whether the actor may apply a sanction to the target.
///
/// Rules are evaluated in order, first match wins. No side effects; every
/// sanction command must pass this before any mutation.
pub fn can_sanction(check: &SanctionCheck) -> Result<(), DenyReason> {
    if check.target_is_bot {
        return Err(DenyReason::TargetIsBot);
    }
    if check.target_is_staff {
        return Err(DenyReason::StaffProtected);
    }
    if check.target_top_position >= check.actor_top_position {
        return Err(DenyReason::AboveActor);
    }
    if check.target_top_position >= check.bot_top_position {
        return Err(DenyReason::AboveBot);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(actor: u16, target: u16, bot: u16) -> SanctionCheck {
        SanctionCheck {
            target_is_bot: false,
            target_is_staff: false,
            actor_top_position: actor,
            target_top_position: target,
            bot_top_position: bot,
        }
    }

    #[test]
    fn test_equal_position_denied() {
        assert_eq!(
            can_sanction(&check(5, 5, 10)),
            Err(DenyReason::AboveActor)
        );
    }

    #[test]
    fn test_lower_target_allowed() {
        assert_eq!(can_sanction(&check(5, 4, 10)), Ok(()));
    }

    #[test]
    fn test_target_above_bot_denied() {
        assert_eq!(can_sanction(&check(10, 6, 5)), Err(DenyReason::AboveBot));
    }

    #[test]
    fn test_bot_target_denied_first() {
        let mut c = check(5, 4, 10);
        c.target_is_bot = true;
        c.target_is_staff = true;
        assert_eq!(can_sanction(&c), Err(DenyReason::TargetIsBot));
    }

    #[test]
    fn test_staff_immunity_denied() {
        let mut c = check(5, 4, 10);
        c.target_is_staff = true;
        assert_eq!(can_sanction(&c), Err(DenyReason::StaffProtected));
    }
}
