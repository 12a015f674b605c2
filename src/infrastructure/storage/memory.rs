//! In-memory repository implementation
//!
//! DashMap-backed storage for development and testing. Durable storage
//! is an external collaborator; anything implementing
//! `RepositoryProvider` with the same atomicity guarantees can replace
//! this.

use dashmap::DashMap;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, LedgerEntry, LedgerRepository, RepositoryProvider, Reservation,
    ReservationRepository, Room, RoomRepository, RoomStatus, RoomType,
};

/// Property id used by the demo seed
pub const DEMO_PROPERTY_ID: &str = "prop-main";

/// In-memory storage for all aggregates
pub struct InMemoryRepositories {
    reservations: DashMap<String, Reservation>,
    rooms: DashMap<String, Room>,
    room_types: DashMap<String, RoomType>,
    ledger: DashMap<String, Vec<LedgerEntry>>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            rooms: DashMap::new(),
            room_types: DashMap::new(),
            ledger: DashMap::new(),
        }
    }

    /// Storage pre-populated with one property, two room types and a
    /// dozen rooms, so the binary is usable out of the box.
    pub fn with_demo_data() -> Self {
        let storage = Self::new();

        let standard = RoomType::new(
            DEMO_PROPERTY_ID,
            "Standard Queen",
            Some("Queen bed, city view".to_string()),
        );
        let deluxe = RoomType::new(
            DEMO_PROPERTY_ID,
            "Deluxe King",
            Some("King bed, corner suite".to_string()),
        );

        for number in 101..=108 {
            let room = Room::new(DEMO_PROPERTY_ID, number.to_string(), &standard.id);
            storage.rooms.insert(room.id.clone(), room);
        }
        for number in 201..=204 {
            let room = Room::new(DEMO_PROPERTY_ID, number.to_string(), &deluxe.id);
            storage.rooms.insert(room.id.clone(), room);
        }

        storage.room_types.insert(standard.id.clone(), standard);
        storage.room_types.insert(deluxe.id.clone(), deluxe);

        info!(
            property_id = DEMO_PROPERTY_ID,
            rooms = storage.rooms.len(),
            "Seeded demo inventory"
        );
        storage
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepositories {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        if self.reservations.contains_key(&reservation.id) {
            return Err(DomainError::Conflict(format!(
                "reservation {} already exists",
                reservation.id
            )));
        }
        self.reservations
            .insert(reservation.id.clone(), reservation);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(id).map(|r| r.clone()))
    }

    async fn find_by_confirmation(&self, number: &str) -> DomainResult<Option<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .find(|r| r.confirmation_number == number)
            .map(|r| r.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.reservations.iter().map(|r| r.clone()).collect())
    }

    async fn find_by_property(&self, property_id: &str) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.property_id == property_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn update(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        // The get_mut guard makes the version check and the write one
        // atomic step.
        let mut stored = self
            .reservations
            .get_mut(&reservation.id)
            .ok_or_else(|| DomainError::not_found("Reservation", &reservation.id))?;

        if stored.version != reservation.version {
            return Err(DomainError::Conflict(format!(
                "reservation {} was modified concurrently (expected version {}, found {})",
                reservation.id, reservation.version, stored.version
            )));
        }

        reservation.version += 1;
        *stored = reservation.clone();
        Ok(reservation)
    }
}

#[async_trait]
impl RoomRepository for InMemoryRepositories {
    async fn save(&self, room: Room) -> DomainResult<()> {
        let duplicate = self
            .rooms
            .iter()
            .any(|r| r.property_id == room.property_id && r.room_number == room.room_number);
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "room {} already exists in property {}",
                room.room_number, room.property_id
            )));
        }
        self.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(id).map(|r| r.clone()))
    }

    async fn list_by_property(&self, property_id: &str) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.property_id == property_id)
            .map(|r| r.clone())
            .collect();
        rooms.sort_by_key(Room::number_sort_key);
        Ok(rooms)
    }

    async fn list_by_room_type(
        &self,
        property_id: &str,
        room_type_id: &str,
    ) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.property_id == property_id && r.room_type_id == room_type_id)
            .map(|r| r.clone())
            .collect();
        rooms.sort_by_key(Room::number_sort_key);
        Ok(rooms)
    }

    async fn update_status(&self, id: &str, status: RoomStatus) -> DomainResult<Room> {
        let mut room = self
            .rooms
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("Room", id))?;
        room.status = status;
        Ok(room.clone())
    }

    async fn save_room_type(&self, room_type: RoomType) -> DomainResult<()> {
        self.room_types.insert(room_type.id.clone(), room_type);
        Ok(())
    }

    async fn find_room_type(&self, id: &str) -> DomainResult<Option<RoomType>> {
        Ok(self.room_types.get(id).map(|rt| rt.clone()))
    }

    async fn list_room_types(&self, property_id: &str) -> DomainResult<Vec<RoomType>> {
        Ok(self
            .room_types
            .iter()
            .filter(|rt| rt.property_id == property_id)
            .map(|rt| rt.clone())
            .collect())
    }
}

#[async_trait]
impl LedgerRepository for InMemoryRepositories {
    async fn append(&self, entry: LedgerEntry) -> DomainResult<()> {
        self.ledger
            .entry(entry.reservation_id.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn list_for_reservation(&self, reservation_id: &str) -> DomainResult<Vec<LedgerEntry>> {
        Ok(self
            .ledger
            .get(reservation_id)
            .map(|entries| entries.clone())
            .unwrap_or_default())
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }

    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn ledger(&self) -> &dyn LedgerRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StayInterval;
    use chrono::NaiveDate;

    fn stay() -> StayInterval {
        StayInterval::new(
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 22).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn versioned_update_bumps_and_conflicts() {
        let repos = InMemoryRepositories::new();
        let r = Reservation::new("g1", "p1", "rt1", stay());
        ReservationRepository::save(&repos, r.clone()).await.unwrap();

        // First writer wins and bumps the version
        let updated = repos.reservations().update(r.clone()).await.unwrap();
        assert_eq!(updated.version, 1);

        // Second writer holding the stale snapshot conflicts
        let err = repos.reservations().update(r).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // The stored copy is the first writer's
        let stored = repos
            .reservations()
            .find_by_id(&updated.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn duplicate_reservation_id_conflicts() {
        let repos = InMemoryRepositories::new();
        let r = Reservation::new("g1", "p1", "rt1", stay());
        ReservationRepository::save(&repos, r.clone()).await.unwrap();
        let err = ReservationRepository::save(&repos, r).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_by_confirmation_number() {
        let repos = InMemoryRepositories::new();
        let r = Reservation::new("g1", "p1", "rt1", stay());
        let number = r.confirmation_number.clone();
        ReservationRepository::save(&repos, r.clone()).await.unwrap();

        let found = repos
            .reservations()
            .find_by_confirmation(&number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, r.id);
        assert!(repos
            .reservations()
            .find_by_confirmation("RSV-NOPE0000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_room_number_within_property_conflicts() {
        let repos = InMemoryRepositories::new();
        RoomRepository::save(&repos, Room::new("p1", "101", "rt1"))
            .await
            .unwrap();
        let err = RoomRepository::save(&repos, Room::new("p1", "101", "rt2"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Same number in another property is fine
        RoomRepository::save(&repos, Room::new("p2", "101", "rt1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rooms_listed_in_number_order() {
        let repos = InMemoryRepositories::new();
        for number in ["203", "9", "101"] {
            RoomRepository::save(&repos, Room::new("p1", number, "rt1"))
                .await
                .unwrap();
        }
        let rooms = repos.rooms().list_by_property("p1").await.unwrap();
        let numbers: Vec<&str> = rooms.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["9", "101", "203"]);
    }

    #[tokio::test]
    async fn ledger_is_append_only_per_reservation() {
        let repos = InMemoryRepositories::new();
        use crate::domain::EntryKind;
        use rust_decimal::Decimal;

        for cents in [100, 200] {
            repos
                .ledger()
                .append(LedgerEntry::new(
                    "r1",
                    EntryKind::Charge,
                    Decimal::new(cents, 2),
                    None,
                ))
                .await
                .unwrap();
        }
        let entries = repos.ledger().list_for_reservation("r1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, Decimal::new(100, 2));
        assert!(repos
            .ledger()
            .list_for_reservation("r2")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn demo_seed_has_inventory() {
        let repos = InMemoryRepositories::with_demo_data();
        let rooms = repos
            .rooms()
            .list_by_property(DEMO_PROPERTY_ID)
            .await
            .unwrap();
        assert_eq!(rooms.len(), 12);
        let types = repos
            .rooms()
            .list_room_types(DEMO_PROPERTY_ID)
            .await
            .unwrap();
        assert_eq!(types.len(), 2);
    }
}
