//! Room inventory index — authoritative occupancy registry
//!
//! Tracks, per room, which reservations claim which date intervals and
//! answers availability queries. Reservation status is a view of
//! occupancy; this index is the source of truth.
//!
//! Intervals are queried far more than mutated during a front-desk
//! shift, so claims are kept as a small sorted vector per room. The
//! overlap check and the claim insertion happen under a single DashMap
//! entry guard, so "check then reserve" is observed atomically by all
//! callers.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::domain::{DomainError, DomainResult, Reservation, Room, StayInterval};

/// A reservation's exclusive claim on a room over a date interval
#[derive(Debug, Clone)]
pub struct IntervalClaim {
    pub reservation_id: String,
    pub interval: StayInterval,
}

/// Thread-safe per-property index of room-interval claims
pub struct RoomInventoryIndex {
    claims: DashMap<String, Vec<IntervalClaim>>,
}

/// Shared, reference-counted inventory index
pub type SharedRoomInventoryIndex = Arc<RoomInventoryIndex>;

impl RoomInventoryIndex {
    pub fn new() -> Self {
        Self {
            claims: DashMap::new(),
        }
    }

    /// Wrap in `Arc` for shared ownership
    pub fn shared() -> SharedRoomInventoryIndex {
        Arc::new(Self::new())
    }

    /// Rebuild the index from reservations that hold a claim
    /// (confirmed/checked-in with an assigned room). Used at startup.
    pub fn load(&self, reservations: &[Reservation]) {
        self.claims.clear();
        for r in reservations {
            if !r.holds_claim() {
                continue;
            }
            let room_id = r.room_id.as_deref().unwrap_or_default();
            if let Err(e) = self.reserve(room_id, &r.id, r.stay) {
                // Stored data violating the no-overlap invariant is not
                // made worse by skipping the late-comer.
                warn!(reservation_id = %r.id, room_id, error = %e, "Skipping conflicting claim during index load");
            }
        }
    }

    /// True iff no other active reservation's interval overlaps.
    /// `exclude_reservation` ignores that reservation's own claim, which
    /// is what transfer and re-assignment queries need.
    pub fn is_available(
        &self,
        room_id: &str,
        interval: StayInterval,
        exclude_reservation: Option<&str>,
    ) -> bool {
        match self.claims.get(room_id) {
            Some(claims) => !claims.iter().any(|c| {
                exclude_reservation != Some(c.reservation_id.as_str())
                    && c.interval.overlaps(&interval)
            }),
            None => true,
        }
    }

    /// Atomically record a claim; `RoomUnavailable` if any other
    /// reservation's claim overlaps. Re-reserving for the same
    /// reservation replaces its previous claim on this room.
    pub fn reserve(
        &self,
        room_id: &str,
        reservation_id: &str,
        interval: StayInterval,
    ) -> DomainResult<()> {
        // The entry guard serializes the overlap check with the insert
        let mut claims = self.claims.entry(room_id.to_string()).or_default();

        if claims
            .iter()
            .any(|c| c.reservation_id != reservation_id && c.interval.overlaps(&interval))
        {
            return Err(DomainError::RoomUnavailable {
                room_id: room_id.to_string(),
                interval,
            });
        }

        claims.retain(|c| c.reservation_id != reservation_id);
        let at = claims
            .binary_search_by_key(&interval.arrival, |c| c.interval.arrival)
            .unwrap_or_else(|i| i);
        claims.insert(
            at,
            IntervalClaim {
                reservation_id: reservation_id.to_string(),
                interval,
            },
        );
        debug!(room_id, reservation_id, %interval, "Reserved room interval");
        Ok(())
    }

    /// Remove a reservation's claim on a room. Idempotent: releasing a
    /// claim that is not present is a no-op.
    pub fn release(&self, room_id: &str, reservation_id: &str) {
        if let Some(mut claims) = self.claims.get_mut(room_id) {
            let before = claims.len();
            claims.retain(|c| c.reservation_id != reservation_id);
            if claims.len() < before {
                debug!(room_id, reservation_id, "Released room interval");
            }
        }
    }

    /// Operational rooms with no conflicting claim for the interval,
    /// ordered by room number (numeric-aware) so auto-assignment is
    /// deterministic.
    pub fn available_rooms(&self, rooms: &[Room], interval: StayInterval) -> Vec<Room> {
        let mut free: Vec<Room> = rooms
            .iter()
            .filter(|room| room.is_operational() && self.is_available(&room.id, interval, None))
            .cloned()
            .collect();
        free.sort_by_key(Room::number_sort_key);
        free
    }

    /// Snapshot of the claims on a room, in arrival order
    pub fn claims(&self, room_id: &str) -> Vec<IntervalClaim> {
        self.claims
            .get(room_id)
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Total number of claims across all rooms
    pub fn claim_count(&self) -> usize {
        self.claims.iter().map(|e| e.value().len()).sum()
    }
}

impl Default for RoomInventoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(a: u32, b: u32) -> StayInterval {
        StayInterval::new(date(2024, 12, a), date(2024, 12, b)).unwrap()
    }

    #[test]
    fn reserve_then_overlap_fails() {
        let index = RoomInventoryIndex::new();
        index.reserve("101", "r1", dec(20, 22)).unwrap();

        let err = index.reserve("101", "r2", dec(21, 23)).unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { .. }));
    }

    #[test]
    fn back_to_back_claims_coexist() {
        let index = RoomInventoryIndex::new();
        index.reserve("101", "r1", dec(20, 22)).unwrap();
        index.reserve("101", "r2", dec(22, 24)).unwrap();
        assert_eq!(index.claims("101").len(), 2);
    }

    #[test]
    fn claims_are_kept_in_arrival_order() {
        let index = RoomInventoryIndex::new();
        index.reserve("101", "r2", dec(25, 28)).unwrap();
        index.reserve("101", "r1", dec(20, 22)).unwrap();
        let claims = index.claims("101");
        assert_eq!(claims[0].reservation_id, "r1");
        assert_eq!(claims[1].reservation_id, "r2");
    }

    #[test]
    fn is_available_excludes_the_named_reservation() {
        let index = RoomInventoryIndex::new();
        index.reserve("101", "r1", dec(20, 22)).unwrap();

        assert!(!index.is_available("101", dec(20, 22), None));
        assert!(index.is_available("101", dec(20, 22), Some("r1")));
        assert!(!index.is_available("101", dec(20, 22), Some("r2")));
    }

    #[test]
    fn re_reserve_replaces_own_claim() {
        let index = RoomInventoryIndex::new();
        index.reserve("101", "r1", dec(20, 22)).unwrap();
        // Same reservation extends its own stay; no self-conflict
        index.reserve("101", "r1", dec(20, 24)).unwrap();

        let claims = index.claims("101");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].interval, dec(20, 24));
    }

    #[test]
    fn release_is_idempotent() {
        let index = RoomInventoryIndex::new();
        index.reserve("101", "r1", dec(20, 22)).unwrap();

        index.release("101", "r1");
        assert!(index.is_available("101", dec(20, 22), None));

        // Second release: no error, no state change
        index.release("101", "r1");
        assert_eq!(index.claim_count(), 0);

        // Releasing a room the index has never seen is also a no-op
        index.release("999", "r1");
    }

    #[test]
    fn available_rooms_sorted_and_filtered() {
        let index = RoomInventoryIndex::new();
        let mut rooms = vec![
            Room::new("p1", "103", "rt1"),
            Room::new("p1", "101", "rt1"),
            Room::new("p1", "102", "rt1"),
        ];
        rooms[2].status = crate::domain::RoomStatus::OutOfService;
        index.reserve(&rooms[0].id, "r1", dec(20, 22)).unwrap();

        let free = index.available_rooms(&rooms, dec(20, 22));
        // 103 is claimed, 102 is out of service; only 101 remains
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].room_number, "101");
    }

    #[test]
    fn concurrent_reserves_one_winner() {
        let index = Arc::new(RoomInventoryIndex::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let index = Arc::clone(&index);
                std::thread::spawn(move || {
                    index.reserve("101", &format!("r{i}"), dec(20, 22)).is_ok()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(index.claim_count(), 1);
    }

    #[test]
    fn no_two_active_claims_overlap_after_mixed_operations() {
        let index = RoomInventoryIndex::new();
        let _ = index.reserve("101", "r1", dec(18, 21));
        let _ = index.reserve("101", "r2", dec(20, 23)); // conflicts, rejected
        let _ = index.reserve("101", "r3", dec(21, 24));
        index.release("101", "r1");
        let _ = index.reserve("101", "r4", dec(18, 22)); // conflicts with r3
        let _ = index.reserve("101", "r5", dec(18, 21));

        let claims = index.claims("101");
        for (i, a) in claims.iter().enumerate() {
            for b in claims.iter().skip(i + 1) {
                assert!(
                    !a.interval.overlaps(&b.interval),
                    "{} and {} overlap",
                    a.reservation_id,
                    b.reservation_id
                );
            }
        }
    }
}
