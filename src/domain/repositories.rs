//! Repository provider
//!
//! Unified access to the per-aggregate repositories. Consumers request
//! only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) -> DomainResult<()> {
//!     let reservation = repos.reservations().find_by_id("...").await?;
//!     let entries = repos.ledger().list_for_reservation("...").await?;
//!     Ok(())
//! }
//! ```

use super::ledger::LedgerRepository;
use super::reservation::ReservationRepository;
use super::room::RoomRepository;

/// Provides access to all domain repositories
pub trait RepositoryProvider: Send + Sync {
    fn reservations(&self) -> &dyn ReservationRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn ledger(&self) -> &dyn LedgerRepository;
}
