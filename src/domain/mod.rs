pub mod error;
pub mod ledger;
pub mod repositories;
pub mod reservation;
pub mod room;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use ledger::{EntryKind, LedgerEntry, LedgerRepository};
pub use repositories::RepositoryProvider;
pub use reservation::{
    ensure_transition, FrontDeskAction, Reservation, ReservationRepository, ReservationStatus,
    StayAdjustmentKind, StayInterval,
};
pub use room::{Room, RoomRepository, RoomStatus, RoomType};
