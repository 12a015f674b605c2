//! Reservation repository trait

use async_trait::async_trait;

use crate::domain::error::DomainResult;

use super::model::Reservation;

/// Persistence seam for reservations.
///
/// `update` enforces optimistic concurrency: the submitted snapshot's
/// `version` must match the stored one, and the stored copy is persisted
/// with `version + 1`. A mismatch yields `DomainError::Conflict` and the
/// caller must re-read before retrying.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation; `Conflict` if the id already exists
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    async fn find_by_confirmation(&self, number: &str) -> DomainResult<Option<Reservation>>;

    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    async fn find_by_property(&self, property_id: &str) -> DomainResult<Vec<Reservation>>;

    /// Versioned update; returns the stored snapshot with the new version
    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation>;
}
