//! Reservation DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{LedgerEntry, Reservation};

/// Request to create a new reservation (the booking producer surface)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1))]
    pub guest_id: String,
    #[validate(length(min = 1))]
    pub property_id: String,
    #[validate(length(min = 1))]
    pub room_type_id: String,
    /// Arrival date (inclusive), ISO 8601 calendar date
    pub arrival_date: NaiveDate,
    /// Departure date (exclusive): the room frees up this day
    pub departure_date: NaiveDate,
}

/// Request to cancel a reservation
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CancelReservationRequest {
    pub reason: Option<String>,
}

/// Request to append a ledger entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AppendLedgerEntryRequest {
    /// One of `charge`, `payment`, `adjustment`
    #[validate(length(min = 1))]
    pub kind: String,
    /// Signed amount: charges positive, payments negative
    pub amount: Decimal,
    pub note: Option<String>,
}

/// Query parameters for listing reservations
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListReservationsParams {
    pub property_id: Option<String>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: String,
    pub confirmation_number: String,
    pub guest_id: String,
    pub property_id: String,
    pub room_type_id: String,
    pub room_id: Option<String>,
    pub arrival_date: String,
    pub departure_date: String,
    pub status: String,
    pub total_amount: Decimal,
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            confirmation_number: r.confirmation_number,
            guest_id: r.guest_id,
            property_id: r.property_id,
            room_type_id: r.room_type_id,
            room_id: r.room_id,
            arrival_date: r.stay.arrival.to_string(),
            departure_date: r.stay.departure.to_string(),
            status: r.status.as_str().to_string(),
            total_amount: r.total_amount,
            version: r.version,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

/// Ledger entry in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerEntryDto {
    pub id: String,
    pub reservation_id: String,
    pub kind: String,
    pub amount: Decimal,
    pub note: Option<String>,
    pub recorded_at: String,
}

impl From<LedgerEntry> for LedgerEntryDto {
    fn from(e: LedgerEntry) -> Self {
        Self {
            id: e.id,
            reservation_id: e.reservation_id,
            kind: e.kind.as_str().to_string(),
            amount: e.amount,
            note: e.note,
            recorded_at: e.recorded_at.to_rfc3339(),
        }
    }
}

/// Ledger history plus the derived balance
#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerSummaryDto {
    pub balance: Decimal,
    pub entries: Vec<LedgerEntryDto>,
}
