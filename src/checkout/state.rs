use std::fmt;

/// Phases of a single checkout call.
///
/// ```text
/// Validating -> Reserving -> Authorizing -> Committing -> Done
///                   |             |              |
///                   +-------------+--------------+--> RollingBack -> Failed
/// Validating ------------------------------------------------------> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Validating,
    Reserving,
    Authorizing,
    Committing,
    RollingBack,
    Done,
    Failed,
}

impl CheckoutState {
    pub fn can_transition_to(self, next: CheckoutState) -> bool {
        use CheckoutState::*;
        matches!(
            (self, next),
            (Validating, Reserving)
                | (Validating, Failed)
                | (Reserving, Authorizing)
                | (Authorizing, Committing)
                | (Committing, Done)
                | (Reserving | Authorizing | Committing, RollingBack)
                | (RollingBack, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CheckoutState::Done | CheckoutState::Failed)
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutState::Validating => "validating",
            CheckoutState::Reserving => "reserving",
            CheckoutState::Authorizing => "authorizing",
            CheckoutState::Committing => "committing",
            CheckoutState::RollingBack => "rolling_back",
            CheckoutState::Done => "done",
            CheckoutState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::CheckoutState::*;

    #[test]
    fn test_happy_path_is_allowed() {
        let path = [Validating, Reserving, Authorizing, Committing, Done];
        assert!(path.windows(2).all(|step| step[0].can_transition_to(step[1])));
    }

    #[test]
    fn test_rollback_only_after_mutation_started() {
        assert!(!Validating.can_transition_to(RollingBack));
        for state in [Reserving, Authorizing, Committing] {
            assert!(state.can_transition_to(RollingBack));
            assert!(!state.can_transition_to(Failed));
        }
        assert!(RollingBack.can_transition_to(Failed));
        assert!(!RollingBack.can_transition_to(Done));
    }

    #[test]
    fn test_terminal_states_go_nowhere() {
        let all = [Validating, Reserving, Authorizing, Committing, RollingBack, Done, Failed];
        for terminal in [Done, Failed] {
            assert!(terminal.is_terminal());
            assert!(all.iter().all(|next| !terminal.can_transition_to(*next)));
        }
    }
}
