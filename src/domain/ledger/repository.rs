//! Ledger repository trait

use async_trait::async_trait;

use crate::domain::error::DomainResult;

use super::model::LedgerEntry;

/// Persistence seam for the append-only billing ledger
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Append an entry. The ledger is append-only; there is no update
    /// or delete.
    async fn append(&self, entry: LedgerEntry) -> DomainResult<()>;

    /// Entries for a reservation in insertion order
    async fn list_for_reservation(&self, reservation_id: &str) -> DomainResult<Vec<LedgerEntry>>;
}
