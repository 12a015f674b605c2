//! Billing ledger service
//!
//! Record-keeping and balance computation over the append-only ledger.
//! Never mutates a reservation's status; the only reservation field it
//! touches is the derived `total_amount` snapshot, refreshed after an
//! append.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, EntryKind, LedgerEntry, RepositoryProvider, Reservation,
};

/// Service for ledger operations
pub struct BillingLedger {
    repos: Arc<dyn RepositoryProvider>,
    /// Appends within one reservation are serialized; across
    /// reservations they are independent.
    reservation_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl BillingLedger {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            reservation_locks: DashMap::new(),
        }
    }

    /// The per-reservation append lock. Front-desk operations take it
    /// around their versioned updates (and express checkout around its
    /// balance read), so appends and state changes never race on the
    /// reservation record.
    pub fn reservation_lock(&self, reservation_id: &str) -> Arc<Mutex<()>> {
        self.reservation_locks
            .entry(reservation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Append an entry for a reservation. `NotFound` if the reservation
    /// is unknown; `Validation` if the amount's sign does not match the
    /// entry kind.
    pub async fn append(
        &self,
        reservation_id: &str,
        kind: EntryKind,
        amount: Decimal,
        note: Option<String>,
    ) -> DomainResult<LedgerEntry> {
        validate_amount(kind, amount)?;

        let lock = self.reservation_lock(reservation_id);
        let _guard = lock.lock().await;

        let reservation = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", reservation_id))?;

        let entry = LedgerEntry::new(reservation_id, kind, amount, note);
        self.repos.ledger().append(entry.clone()).await?;

        self.refresh_total(reservation).await?;

        info!(
            reservation_id,
            kind = %kind,
            amount = %amount,
            "Ledger entry appended"
        );
        Ok(entry)
    }

    /// Current balance: sum of all entry amounts, zero when none exist
    pub async fn balance(&self, reservation_id: &str) -> DomainResult<Decimal> {
        self.ensure_reservation(reservation_id).await?;
        let entries = self
            .repos
            .ledger()
            .list_for_reservation(reservation_id)
            .await?;
        Ok(entries.iter().map(|e| e.amount).sum())
    }

    /// Full entry history in insertion order
    pub async fn history(&self, reservation_id: &str) -> DomainResult<Vec<LedgerEntry>> {
        self.ensure_reservation(reservation_id).await?;
        self.repos
            .ledger()
            .list_for_reservation(reservation_id)
            .await
    }

    async fn ensure_reservation(&self, reservation_id: &str) -> DomainResult<()> {
        self.repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", reservation_id))?;
        Ok(())
    }

    /// Refresh the reservation's derived `total_amount` (gross charges).
    /// The caller holds the reservation's append lock, and every
    /// front-desk update runs under the same lock, so this update cannot
    /// lose a version race.
    async fn refresh_total(&self, mut reservation: Reservation) -> DomainResult<()> {
        let entries = self
            .repos
            .ledger()
            .list_for_reservation(&reservation.id)
            .await?;
        reservation.total_amount = entries
            .iter()
            .filter(|e| e.kind == EntryKind::Charge)
            .map(|e| e.amount)
            .sum();
        reservation.touch();
        self.repos.reservations().update(reservation).await?;
        Ok(())
    }
}

fn validate_amount(kind: EntryKind, amount: Decimal) -> DomainResult<()> {
    let ok = match kind {
        EntryKind::Charge => amount > Decimal::ZERO,
        EntryKind::Payment => amount < Decimal::ZERO,
        EntryKind::Adjustment => true,
    };
    if ok {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "{} entries require a {} amount, got {}",
            kind,
            match kind {
                EntryKind::Charge => "positive",
                _ => "negative",
            },
            amount
        )))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReservationStatus, StayInterval};
    use crate::infrastructure::storage::InMemoryRepositories;
    use chrono::NaiveDate;

    fn stay() -> StayInterval {
        StayInterval::new(
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 22).unwrap(),
        )
        .unwrap()
    }

    async fn fixture() -> (Arc<InMemoryRepositories>, BillingLedger, String) {
        let repos = Arc::new(InMemoryRepositories::new());
        let reservation = Reservation::new("g1", "p1", "rt1", stay());
        let id = reservation.id.clone();
        repos.reservations().save(reservation).await.unwrap();
        let ledger = BillingLedger::new(repos.clone() as Arc<dyn RepositoryProvider>);
        (repos, ledger, id)
    }

    #[tokio::test]
    async fn balance_is_zero_with_no_entries() {
        let (_, ledger, id) = fixture().await;
        assert_eq!(ledger.balance(&id).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn append_and_balance() {
        let (_, ledger, id) = fixture().await;
        ledger
            .append(&id, EntryKind::Charge, Decimal::new(4250, 2), None)
            .await
            .unwrap();
        ledger
            .append(&id, EntryKind::Payment, Decimal::new(-1000, 2), None)
            .await
            .unwrap();
        assert_eq!(ledger.balance(&id).await.unwrap(), Decimal::new(3250, 2));
    }

    #[tokio::test]
    async fn history_preserves_insertion_order() {
        let (_, ledger, id) = fixture().await;
        for cents in [1000, 2000, 3000] {
            ledger
                .append(&id, EntryKind::Charge, Decimal::new(cents, 2), None)
                .await
                .unwrap();
        }
        let history = ledger.history(&id).await.unwrap();
        let amounts: Vec<Decimal> = history.iter().map(|e| e.amount).collect();
        assert_eq!(
            amounts,
            vec![
                Decimal::new(1000, 2),
                Decimal::new(2000, 2),
                Decimal::new(3000, 2)
            ]
        );
    }

    #[tokio::test]
    async fn unknown_reservation_is_not_found() {
        let (_, ledger, _) = fixture().await;
        let err = ledger
            .append("nope", EntryKind::Charge, Decimal::ONE, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(matches!(
            ledger.balance("nope").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn sign_validation_per_kind() {
        let (_, ledger, id) = fixture().await;
        let err = ledger
            .append(&id, EntryKind::Charge, Decimal::new(-100, 2), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = ledger
            .append(&id, EntryKind::Payment, Decimal::new(100, 2), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Zero-amount adjustments are the audit-entry path
        ledger
            .append(&id, EntryKind::Adjustment, Decimal::ZERO, Some("audit".into()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn total_amount_tracks_gross_charges() {
        let (repos, ledger, id) = fixture().await;
        ledger
            .append(&id, EntryKind::Charge, Decimal::new(4250, 2), None)
            .await
            .unwrap();
        ledger
            .append(&id, EntryKind::Payment, Decimal::new(-4250, 2), None)
            .await
            .unwrap();

        let r = repos.reservations().find_by_id(&id).await.unwrap().unwrap();
        // Payments settle the balance but do not shrink gross charges
        assert_eq!(r.total_amount, Decimal::new(4250, 2));
        assert_eq!(ledger.balance(&id).await.unwrap(), Decimal::ZERO);
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }
}
