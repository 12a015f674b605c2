//! Room and room type domain entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Operational status of a room.
///
/// Occupancy is not a field here; it is derived from the inventory
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    OutOfService,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OutOfService => "out_of_service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "out_of_service" => Some(Self::OutOfService),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical room within a property
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub property_id: String,
    /// Unique within the property, e.g. "101"
    pub room_number: String,
    pub room_type_id: String,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(
        property_id: impl Into<String>,
        room_number: impl Into<String>,
        room_type_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            property_id: property_id.into(),
            room_number: room_number.into(),
            room_type_id: room_type_id.into(),
            status: RoomStatus::Available,
            created_at: Utc::now(),
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == RoomStatus::Available
    }

    /// Sort key for deterministic room assignment: numeric room numbers
    /// order numerically, everything else falls back to lexicographic.
    pub fn number_sort_key(&self) -> (u32, String) {
        (
            self.room_number.parse::<u32>().unwrap_or(u32::MAX),
            self.room_number.clone(),
        )
    }
}

/// Immutable reference data describing a class of rooms
#[derive(Debug, Clone)]
pub struct RoomType {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl RoomType {
    pub fn new(
        property_id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            property_id: property_id.into(),
            name: name.into(),
            description,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_is_operational() {
        let room = Room::new("p1", "101", "rt1");
        assert!(room.is_operational());
        assert_eq!(room.status, RoomStatus::Available);
    }

    #[test]
    fn out_of_service_room_is_not_operational() {
        let mut room = Room::new("p1", "101", "rt1");
        room.status = RoomStatus::OutOfService;
        assert!(!room.is_operational());
    }

    #[test]
    fn numeric_room_numbers_sort_numerically() {
        let r9 = Room::new("p1", "9", "rt1");
        let r101 = Room::new("p1", "101", "rt1");
        assert!(r9.number_sort_key() < r101.number_sort_key());
    }

    #[test]
    fn non_numeric_room_numbers_sort_after_numeric() {
        let r101 = Room::new("p1", "101", "rt1");
        let penthouse = Room::new("p1", "PH-1", "rt1");
        assert!(r101.number_sort_key() < penthouse.number_sort_key());
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [RoomStatus::Available, RoomStatus::OutOfService] {
            assert_eq!(RoomStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RoomStatus::parse("haunted"), None);
    }
}
