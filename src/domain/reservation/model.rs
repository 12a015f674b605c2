//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Booked but not yet confirmed
    Pending,
    /// Confirmed booking, not yet in house
    Confirmed,
    /// Guest is in house
    CheckedIn,
    /// Stay completed (terminal)
    CheckedOut,
    /// Booking cancelled before arrival (terminal)
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Statuses that hold exclusive claim on room-interval space
    pub fn claims_inventory(&self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open stay interval `[arrival, departure)` in calendar dates.
///
/// Departure day is exclusive: a guest leaving on the 22nd frees the room
/// for a guest arriving on the 22nd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayInterval {
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
}

impl StayInterval {
    pub fn new(arrival: NaiveDate, departure: NaiveDate) -> DomainResult<Self> {
        if arrival >= departure {
            return Err(DomainError::Validation(format!(
                "arrival {} must precede departure {}",
                arrival, departure
            )));
        }
        Ok(Self { arrival, departure })
    }

    /// `[a1,b1)` and `[a2,b2)` overlap iff `a1 < b2 && a2 < b1`
    pub fn overlaps(&self, other: &StayInterval) -> bool {
        self.arrival < other.departure && other.arrival < self.departure
    }

    pub fn nights(&self) -> i64 {
        (self.departure - self.arrival).num_days()
    }
}

impl std::fmt::Display for StayInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.arrival, self.departure)
    }
}

/// Hotel reservation aggregate
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Internal unique ID
    pub id: String,
    /// Guest-facing unique identifier
    pub confirmation_number: String,
    pub guest_id: String,
    pub property_id: String,
    pub room_type_id: String,
    /// Assigned room, if any. A reference into `Room`, never ownership.
    pub room_id: Option<String>,
    pub stay: StayInterval,
    pub status: ReservationStatus,
    /// Gross charges posted to the ledger. Derived; refreshed on append.
    pub total_amount: Decimal,
    /// Optimistic concurrency version, bumped by the repository on update
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        guest_id: impl Into<String>,
        property_id: impl Into<String>,
        room_type_id: impl Into<String>,
        stay: StayInterval,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            confirmation_number: generate_confirmation_number(),
            guest_id: guest_id.into(),
            property_id: property_id.into(),
            room_type_id: room_type_id.into(),
            room_id: None,
            stay,
            status: ReservationStatus::Confirmed,
            total_amount: Decimal::ZERO,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this reservation currently holds room-interval space
    pub fn holds_claim(&self) -> bool {
        self.status.claims_inventory() && self.room_id.is_some()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Human-facing confirmation number, e.g. `RSV-9F3A2C01`
fn generate_confirmation_number() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("RSV-{}", raw[..8].to_uppercase())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(a: (i32, u32, u32), b: (i32, u32, u32)) -> StayInterval {
        StayInterval::new(date(a.0, a.1, a.2), date(b.0, b.1, b.2)).unwrap()
    }

    #[test]
    fn interval_rejects_inverted_dates() {
        let err = StayInterval::new(date(2024, 12, 22), date(2024, 12, 20)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn interval_rejects_zero_nights() {
        assert!(StayInterval::new(date(2024, 12, 20), date(2024, 12, 20)).is_err());
    }

    #[test]
    fn overlapping_intervals() {
        let a = interval((2024, 12, 20), (2024, 12, 22));
        let b = interval((2024, 12, 21), (2024, 12, 23));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn back_to_back_intervals_do_not_overlap() {
        // Departure day is exclusive: [20,22) and [22,24) share no night
        let a = interval((2024, 12, 20), (2024, 12, 22));
        let b = interval((2024, 12, 22), (2024, 12, 24));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn contained_interval_overlaps() {
        let outer = interval((2024, 12, 18), (2024, 12, 28));
        let inner = interval((2024, 12, 20), (2024, 12, 22));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn nights_count() {
        assert_eq!(interval((2024, 12, 20), (2024, 12, 22)).nights(), 2);
    }

    #[test]
    fn new_reservation_is_confirmed_and_unassigned() {
        let r = Reservation::new("g1", "p1", "rt1", interval((2024, 12, 20), (2024, 12, 22)));
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert!(r.room_id.is_none());
        assert!(!r.holds_claim());
        assert_eq!(r.total_amount, Decimal::ZERO);
        assert_eq!(r.version, 0);
    }

    #[test]
    fn confirmation_number_format() {
        let r = Reservation::new("g1", "p1", "rt1", interval((2024, 12, 20), (2024, 12, 22)));
        assert!(r.confirmation_number.starts_with("RSV-"));
        assert_eq!(r.confirmation_number.len(), 12);
    }

    #[test]
    fn terminal_statuses() {
        assert!(ReservationStatus::CheckedOut.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::CheckedIn.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());
    }

    #[test]
    fn claiming_statuses() {
        assert!(ReservationStatus::Confirmed.claims_inventory());
        assert!(ReservationStatus::CheckedIn.claims_inventory());
        assert!(!ReservationStatus::Pending.claims_inventory());
        assert!(!ReservationStatus::CheckedOut.claims_inventory());
        assert!(!ReservationStatus::Cancelled.claims_inventory());
    }
}
