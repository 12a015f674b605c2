//! Front desk operations service
//!
//! Orchestrates the guest-facing operations: check-in, check-out,
//! express checkout, room transfer, stay adjustment and cancellation.
//! Each operation is a single atomic unit spanning reservation status,
//! room claim and ledger; on any guard failure the pre-operation state
//! is unchanged and exactly one structured error is returned.
//!
//! A per-reservation async mutex serializes operations on the same
//! reservation; inventory claims are serialized inside
//! `RoomInventoryIndex` itself. Operations additionally take the
//! billing ledger's per-reservation append lock around their versioned
//! updates (op lock first, then ledger lock, never the reverse), so a
//! direct ledger append can never bump the version under a running
//! operation.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::{
    ensure_transition, DomainError, DomainResult, EntryKind, FrontDeskAction, RepositoryProvider,
    Reservation, ReservationStatus, Room, StayAdjustmentKind, StayInterval,
};

use super::billing::BillingLedger;
use super::inventory::SharedRoomInventoryIndex;

/// Service implementing the front-desk operation surface
pub struct FrontDeskService {
    repos: Arc<dyn RepositoryProvider>,
    inventory: SharedRoomInventoryIndex,
    billing: Arc<BillingLedger>,
    op_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FrontDeskService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        inventory: SharedRoomInventoryIndex,
        billing: Arc<BillingLedger>,
    ) -> Self {
        Self {
            repos,
            inventory,
            billing,
            op_locks: DashMap::new(),
        }
    }

    /// Check a guest in, assigning a room if none was requested.
    ///
    /// With an explicit `room_id` the room must be operational and in the
    /// reservation's property. Without one, candidate rooms of the
    /// reservation's room type are tried in room-number order; under
    /// concurrent check-ins each candidate claim is atomic, so exactly
    /// one caller wins a contested room and the loser moves on.
    pub async fn check_in(
        &self,
        reservation_id: &str,
        room_id: Option<&str>,
    ) -> DomainResult<Reservation> {
        let lock = self.op_lock(reservation_id);
        let _guard = lock.lock().await;
        let result = self.check_in_inner(reservation_id, room_id).await;
        self.observe("check_in", reservation_id, &result);
        result
    }

    async fn check_in_inner(
        &self,
        reservation_id: &str,
        room_id: Option<&str>,
    ) -> DomainResult<Reservation> {
        // Direct ledger appends refresh `total_amount` under this lock,
        // bumping the version; holding it across the update keeps the
        // version race out.
        let ledger_lock = self.billing.reservation_lock(reservation_id);
        let _ledger_guard = ledger_lock.lock().await;

        let mut reservation = self.load(reservation_id).await?;
        ensure_transition(reservation.status, FrontDeskAction::CheckIn)?;

        let previous_room = reservation.room_id.clone();
        let requested = room_id.map(str::to_owned).or_else(|| previous_room.clone());

        let room = match requested {
            Some(id) => {
                let room = self.load_room(&id).await?;
                self.ensure_assignable(&reservation, &room)?;
                self.inventory
                    .reserve(&room.id, &reservation.id, reservation.stay)?;
                room
            }
            None => self.auto_assign(&reservation).await?,
        };

        reservation.room_id = Some(room.id.clone());
        reservation.status = ReservationStatus::CheckedIn;
        reservation.touch();

        match self.repos.reservations().update(reservation).await {
            Ok(stored) => {
                if let Some(old) = previous_room.filter(|old| *old != room.id) {
                    self.inventory.release(&old, reservation_id);
                }
                Ok(stored)
            }
            Err(e) => {
                // Undo the claim so the failed operation leaves no trace
                if previous_room.as_deref() != Some(room.id.as_str()) {
                    self.inventory.release(&room.id, reservation_id);
                }
                Err(e)
            }
        }
    }

    /// Standard checkout; any remaining balance is a later collections
    /// concern.
    pub async fn check_out(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let lock = self.op_lock(reservation_id);
        let _guard = lock.lock().await;
        let result = self.check_out_inner(reservation_id, false).await;
        self.observe("check_out", reservation_id, &result);
        result
    }

    /// Express checkout: requires a zero ledger balance
    pub async fn express_check_out(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let lock = self.op_lock(reservation_id);
        let _guard = lock.lock().await;
        let result = self.check_out_inner(reservation_id, true).await;
        self.observe("express_check_out", reservation_id, &result);
        result
    }

    async fn check_out_inner(
        &self,
        reservation_id: &str,
        express: bool,
    ) -> DomainResult<Reservation> {
        // Hold the ledger's append lock across the balance read and the
        // commit, so a concurrent charge cannot slip in between.
        let ledger_lock = self.billing.reservation_lock(reservation_id);
        let _ledger_guard = ledger_lock.lock().await;

        let reservation = self.load(reservation_id).await?;
        let action = if express {
            FrontDeskAction::ExpressCheckOut
        } else {
            FrontDeskAction::CheckOut
        };
        ensure_transition(reservation.status, action)?;

        if express {
            let balance = self.billing.balance(reservation_id).await?;
            if !balance.is_zero() {
                return Err(DomainError::BalanceNotZero { balance });
            }
        }
        self.commit_check_out(reservation).await
    }

    async fn commit_check_out(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        // room_id stays on the record for history; only the claim goes
        let room_id = reservation.room_id.clone();
        reservation.status = ReservationStatus::CheckedOut;
        reservation.touch();

        let stored = self.repos.reservations().update(reservation).await?;
        if let Some(room) = room_id {
            self.inventory.release(&room, &stored.id);
        }
        Ok(stored)
    }

    /// Move an in-house guest to another room for the remainder of the
    /// stay. All-or-nothing: if the target room conflicts, the original
    /// claim, status and room assignment are untouched.
    pub async fn transfer_room(
        &self,
        reservation_id: &str,
        target_room_id: &str,
        reason: Option<&str>,
    ) -> DomainResult<Reservation> {
        let lock = self.op_lock(reservation_id);
        let _guard = lock.lock().await;
        let result = self
            .transfer_room_inner(reservation_id, target_room_id, reason)
            .await;
        self.observe("transfer_room", reservation_id, &result);
        result
    }

    async fn transfer_room_inner(
        &self,
        reservation_id: &str,
        target_room_id: &str,
        reason: Option<&str>,
    ) -> DomainResult<Reservation> {
        // Direct ledger appends bump the version under this lock; taking
        // it before the snapshot read keeps the update conflict-free.
        let ledger_lock = self.billing.reservation_lock(reservation_id);
        let ledger_guard = ledger_lock.lock().await;

        let mut reservation = self.load(reservation_id).await?;
        ensure_transition(reservation.status, FrontDeskAction::Transfer)?;

        let current_room = reservation.room_id.clone().ok_or_else(|| {
            DomainError::Validation(format!(
                "reservation {} has no room assigned",
                reservation_id
            ))
        })?;

        let target = self.load_room(target_room_id).await?;
        self.ensure_assignable(&reservation, &target)?;
        if target.id == current_room {
            return Err(DomainError::Validation(
                "transfer target is the reservation's current room".to_string(),
            ));
        }

        // Claim the target before touching the source; the source claim
        // is released only once the new assignment is stored, so no
        // failure path leaves the guest without a claim.
        self.inventory
            .reserve(&target.id, &reservation.id, reservation.stay)?;

        reservation.room_id = Some(target.id.clone());
        reservation.touch();

        match self.repos.reservations().update(reservation).await {
            Ok(stored) => {
                self.inventory.release(&current_room, reservation_id);
                drop(ledger_guard);
                self.append_audit(
                    reservation_id,
                    format!(
                        "Room transfer to {}{}",
                        target.room_number,
                        reason.map(|r| format!(": {r}")).unwrap_or_default()
                    ),
                )
                .await;
                Ok(stored)
            }
            Err(e) => {
                self.inventory.release(&target.id, reservation_id);
                Err(e)
            }
        }
    }

    /// Early check-in or late check-out, optionally chargeable. Room
    /// assignment is never changed by an adjustment.
    pub async fn apply_stay_adjustment(
        &self,
        reservation_id: &str,
        kind: StayAdjustmentKind,
        additional_charge: Decimal,
        notes: Option<&str>,
    ) -> DomainResult<Reservation> {
        let lock = self.op_lock(reservation_id);
        let _guard = lock.lock().await;
        let result = self
            .apply_stay_adjustment_inner(reservation_id, kind, additional_charge, notes)
            .await;
        self.observe("stay_adjustment", reservation_id, &result);
        result
    }

    async fn apply_stay_adjustment_inner(
        &self,
        reservation_id: &str,
        kind: StayAdjustmentKind,
        additional_charge: Decimal,
        notes: Option<&str>,
    ) -> DomainResult<Reservation> {
        let reservation = self.load(reservation_id).await?;
        ensure_transition(reservation.status, FrontDeskAction::Adjust(kind))?;

        if additional_charge < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "additional charge must not be negative, got {additional_charge}"
            )));
        }

        if additional_charge > Decimal::ZERO {
            let note = match notes {
                Some(n) => format!("{kind}: {n}"),
                None => kind.to_string(),
            };
            self.billing
                .append(reservation_id, EntryKind::Charge, additional_charge, Some(note))
                .await?;
            // The append refreshed the stored snapshot
            return self.load(reservation_id).await;
        }

        Ok(reservation)
    }

    /// Cancel a reservation before arrival, releasing any held claim
    pub async fn cancel(
        &self,
        reservation_id: &str,
        reason: Option<&str>,
    ) -> DomainResult<Reservation> {
        let lock = self.op_lock(reservation_id);
        let _guard = lock.lock().await;
        let result = self.cancel_inner(reservation_id, reason).await;
        self.observe("cancel", reservation_id, &result);
        result
    }

    async fn cancel_inner(
        &self,
        reservation_id: &str,
        reason: Option<&str>,
    ) -> DomainResult<Reservation> {
        let ledger_lock = self.billing.reservation_lock(reservation_id);
        let ledger_guard = ledger_lock.lock().await;

        let mut reservation = self.load(reservation_id).await?;
        ensure_transition(reservation.status, FrontDeskAction::Cancel)?;

        let room_id = reservation.room_id.clone();
        reservation.status = ReservationStatus::Cancelled;
        reservation.touch();

        let stored = self.repos.reservations().update(reservation).await?;
        if let Some(room) = room_id {
            self.inventory.release(&room, &stored.id);
        }
        drop(ledger_guard);
        if let Some(reason) = reason {
            self.append_audit(reservation_id, format!("Cancelled: {reason}"))
                .await;
        }
        Ok(stored)
    }

    /// Candidate rooms for assignment or transfer
    pub async fn available_rooms(
        &self,
        property_id: &str,
        room_type_id: &str,
        interval: StayInterval,
    ) -> DomainResult<Vec<Room>> {
        let rooms = self
            .repos
            .rooms()
            .list_by_room_type(property_id, room_type_id)
            .await?;
        Ok(self.inventory.available_rooms(&rooms, interval))
    }

    // ── internals ──────────────────────────────────────────────

    fn op_lock(&self, reservation_id: &str) -> Arc<Mutex<()>> {
        self.op_locks
            .entry(reservation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load(&self, reservation_id: &str) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", reservation_id))
    }

    async fn load_room(&self, room_id: &str) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", room_id))
    }

    fn ensure_assignable(&self, reservation: &Reservation, room: &Room) -> DomainResult<()> {
        if room.property_id != reservation.property_id {
            return Err(DomainError::Validation(format!(
                "room {} belongs to a different property",
                room.room_number
            )));
        }
        if !room.is_operational() {
            return Err(DomainError::Validation(format!(
                "room {} is out of service",
                room.room_number
            )));
        }
        Ok(())
    }

    /// Pick the lowest-numbered free room of the reservation's type.
    /// Each claim attempt is atomic; losing a race moves on to the next
    /// candidate instead of retrying the same room.
    async fn auto_assign(&self, reservation: &Reservation) -> DomainResult<Room> {
        let rooms = self
            .repos
            .rooms()
            .list_by_room_type(&reservation.property_id, &reservation.room_type_id)
            .await?;
        for room in self.inventory.available_rooms(&rooms, reservation.stay) {
            if self
                .inventory
                .reserve(&room.id, &reservation.id, reservation.stay)
                .is_ok()
            {
                return Ok(room);
            }
        }
        Err(DomainError::RoomUnavailable {
            room_id: format!("of type {}", reservation.room_type_id),
            interval: reservation.stay,
        })
    }

    /// Zero-amount ledger entry for traceability. The operation has
    /// already committed; an audit failure is logged, not propagated.
    async fn append_audit(&self, reservation_id: &str, note: String) {
        if let Err(e) = self
            .billing
            .append(reservation_id, EntryKind::Adjustment, Decimal::ZERO, Some(note))
            .await
        {
            error!(reservation_id, error = %e, "Failed to append audit ledger entry");
        }
    }

    fn observe(
        &self,
        operation: &'static str,
        reservation_id: &str,
        result: &DomainResult<Reservation>,
    ) {
        let outcome = if result.is_ok() { "ok" } else { "rejected" };
        metrics::counter!(
            "frontdesk_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        match result {
            Ok(r) => info!(
                reservation_id,
                operation,
                status = %r.status,
                room_id = r.room_id.as_deref().unwrap_or("-"),
                "Front desk operation completed"
            ),
            Err(e) => warn!(reservation_id, operation, error = %e, "Front desk operation rejected"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
