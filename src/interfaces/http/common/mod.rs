//! Common HTTP building blocks

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API response wrapper.
///
/// Every REST endpoint returns data in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "message"}` — the message is
/// surfaced verbatim by the UI.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload; `null` on failure
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for each domain error kind
pub fn domain_error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::RoomUnavailable { .. }
        | DomainError::BalanceNotZero { .. }
        | DomainError::Conflict(_) => StatusCode::CONFLICT,
    }
}

/// Map a domain error into the standard failure response
pub fn domain_error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        domain_error_status(&err),
        Json(ApiResponse::error(err.to_string())),
    )
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReservationStatus, StayInterval};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn status_mapping_per_error_kind() {
        let interval = StayInterval::new(
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 22).unwrap(),
        )
        .unwrap();

        assert_eq!(
            domain_error_status(&DomainError::not_found("Reservation", "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_error_status(&DomainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error_status(&DomainError::InvalidTransition {
                from: ReservationStatus::CheckedOut,
                action: "check in",
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            domain_error_status(&DomainError::RoomUnavailable {
                room_id: "101".into(),
                interval,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_error_status(&DomainError::BalanceNotZero {
                balance: Decimal::ONE
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn error_envelope_carries_the_message() {
        let resp: ApiResponse<()> = ApiResponse::error("room 101 is not available");
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("room 101 is not available"));
    }

    #[test]
    fn success_envelope_omits_the_error_field() {
        let json = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "ok");
        assert!(json.get("error").is_none());
    }
}
