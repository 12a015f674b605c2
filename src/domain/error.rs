//! Domain error taxonomy
//!
//! Every failure the engine can produce is one of these variants. All of
//! them are recoverable by the caller: the engine never partially commits,
//! so a returned error means the pre-operation state is unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

use super::reservation::{ReservationStatus, StayInterval};

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("cannot {action} a reservation in status {from}")]
    InvalidTransition {
        from: ReservationStatus,
        action: &'static str,
    },

    #[error("room {room_id} is not available for {interval}")]
    RoomUnavailable {
        room_id: String,
        interval: StayInterval,
    },

    #[error("outstanding balance of {balance} must be settled before express checkout")]
    BalanceNotZero { balance: Decimal },

    #[error("validation: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
