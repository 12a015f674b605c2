//! Reservation state machine
//!
//! The single source of truth for which front-desk actions are legal in
//! which status. Guards that depend on external state (room availability,
//! ledger balance) are checked by the orchestrating service; a failure
//! there surfaces as `RoomUnavailable` / `BalanceNotZero`, never as
//! `InvalidTransition`.

use crate::domain::error::{DomainError, DomainResult};

use super::model::ReservationStatus;

/// Stay adjustment variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayAdjustmentKind {
    EarlyCheckIn,
    LateCheckOut,
}

impl StayAdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyCheckIn => "early_checkin",
            Self::LateCheckOut => "late_checkout",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "early_checkin" => Some(Self::EarlyCheckIn),
            "late_checkout" => Some(Self::LateCheckOut),
            _ => None,
        }
    }
}

impl std::fmt::Display for StayAdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest-facing operations that drive status transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontDeskAction {
    CheckIn,
    CheckOut,
    ExpressCheckOut,
    Cancel,
    Transfer,
    Adjust(StayAdjustmentKind),
}

impl FrontDeskAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "check in",
            Self::CheckOut => "check out",
            Self::ExpressCheckOut => "express check out",
            Self::Cancel => "cancel",
            Self::Transfer => "transfer",
            Self::Adjust(StayAdjustmentKind::EarlyCheckIn) => "apply early check-in",
            Self::Adjust(StayAdjustmentKind::LateCheckOut) => "apply late check-out",
        }
    }
}

/// Validate a requested action against the transition table.
///
/// `pending/confirmed → checked_in → checked_out`, with `cancelled`
/// reachable from `pending`/`confirmed` only; no transitions out of the
/// terminal states.
pub fn ensure_transition(status: ReservationStatus, action: FrontDeskAction) -> DomainResult<()> {
    use FrontDeskAction::*;
    use ReservationStatus::*;

    let allowed = match action {
        CheckIn => matches!(status, Pending | Confirmed),
        CheckOut | ExpressCheckOut => status == CheckedIn,
        Cancel => matches!(status, Pending | Confirmed),
        Transfer => status == CheckedIn,
        Adjust(StayAdjustmentKind::EarlyCheckIn) => matches!(status, Pending | Confirmed),
        Adjust(StayAdjustmentKind::LateCheckOut) => status == CheckedIn,
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition {
            from: status,
            action: action.as_str(),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use FrontDeskAction::*;
    use ReservationStatus::*;

    const ALL_STATUSES: [ReservationStatus; 5] =
        [Pending, Confirmed, CheckedIn, CheckedOut, Cancelled];

    fn actions() -> Vec<FrontDeskAction> {
        vec![
            CheckIn,
            CheckOut,
            ExpressCheckOut,
            Cancel,
            Transfer,
            Adjust(StayAdjustmentKind::EarlyCheckIn),
            Adjust(StayAdjustmentKind::LateCheckOut),
        ]
    }

    #[test]
    fn check_in_from_pending_and_confirmed_only() {
        assert!(ensure_transition(Pending, CheckIn).is_ok());
        assert!(ensure_transition(Confirmed, CheckIn).is_ok());
        assert!(ensure_transition(CheckedIn, CheckIn).is_err());
        assert!(ensure_transition(CheckedOut, CheckIn).is_err());
        assert!(ensure_transition(Cancelled, CheckIn).is_err());
    }

    #[test]
    fn check_out_variants_require_in_house() {
        for action in [CheckOut, ExpressCheckOut] {
            assert!(ensure_transition(CheckedIn, action).is_ok());
            assert!(ensure_transition(Confirmed, action).is_err());
            assert!(ensure_transition(CheckedOut, action).is_err());
        }
    }

    #[test]
    fn cancel_only_before_arrival() {
        assert!(ensure_transition(Pending, Cancel).is_ok());
        assert!(ensure_transition(Confirmed, Cancel).is_ok());
        assert!(ensure_transition(CheckedIn, Cancel).is_err());
        assert!(ensure_transition(Cancelled, Cancel).is_err());
    }

    #[test]
    fn transfer_requires_in_house() {
        assert!(ensure_transition(CheckedIn, Transfer).is_ok());
        assert!(ensure_transition(Confirmed, Transfer).is_err());
    }

    #[test]
    fn adjustment_guards_per_kind() {
        let early = Adjust(StayAdjustmentKind::EarlyCheckIn);
        let late = Adjust(StayAdjustmentKind::LateCheckOut);

        assert!(ensure_transition(Pending, early).is_ok());
        assert!(ensure_transition(Confirmed, early).is_ok());
        assert!(ensure_transition(CheckedIn, early).is_err());

        assert!(ensure_transition(CheckedIn, late).is_ok());
        assert!(ensure_transition(Confirmed, late).is_err());
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for status in [CheckedOut, Cancelled] {
            for action in actions() {
                let err = ensure_transition(status, action).unwrap_err();
                assert!(
                    matches!(err, crate::domain::DomainError::InvalidTransition { .. }),
                    "{status} must reject {action:?}"
                );
            }
        }
    }

    #[test]
    fn rejections_carry_the_source_status() {
        let err = ensure_transition(CheckedOut, CheckIn).unwrap_err();
        match err {
            crate::domain::DomainError::InvalidTransition { from, .. } => {
                assert_eq!(from, CheckedOut)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn adjustment_kind_parse_roundtrip() {
        for kind in [StayAdjustmentKind::EarlyCheckIn, StayAdjustmentKind::LateCheckOut] {
            assert_eq!(StayAdjustmentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(StayAdjustmentKind::parse("mid_stay_nap"), None);
    }

    #[test]
    fn every_status_action_pair_is_total() {
        // ensure_transition must answer for the whole table, never panic
        for status in ALL_STATUSES {
            for action in actions() {
                let _ = ensure_transition(status, action);
            }
        }
    }
}
