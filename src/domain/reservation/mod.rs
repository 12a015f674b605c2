//! Reservation aggregate: entity, state machine, repository trait

pub mod model;
pub mod repository;
pub mod state;

pub use model::{Reservation, ReservationStatus, StayInterval};
pub use repository::ReservationRepository;
pub use state::{ensure_transition, FrontDeskAction, StayAdjustmentKind};
