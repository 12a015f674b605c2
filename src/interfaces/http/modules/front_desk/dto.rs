//! Front-desk operation DTOs

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request to check a guest in
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(length(min = 1))]
    pub reservation_id: String,
    /// Specific room to assign; omitted means auto-assign from the
    /// reservation's room type
    pub room_id: Option<String>,
}

/// Request to check a guest out
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckOutRequest {
    #[validate(length(min = 1))]
    pub reservation_id: String,
}

/// Request to move an in-house guest to another room
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransferRoomRequest {
    #[validate(length(min = 1))]
    pub reservation_id: String,
    #[validate(length(min = 1))]
    pub target_room_id: String,
    pub reason: Option<String>,
}

/// Request to record an early check-in or late check-out
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StayAdjustmentRequest {
    #[validate(length(min = 1))]
    pub reservation_id: String,
    /// One of `early_checkin`, `late_checkout`
    #[validate(length(min = 1))]
    pub adjustment_type: String,
    /// Fee posted to the ledger; zero records the adjustment without a charge
    pub additional_charge: Decimal,
    pub notes: Option<String>,
}
