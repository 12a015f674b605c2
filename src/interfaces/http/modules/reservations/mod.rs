//! Reservation CRUD, cancellation, and ledger endpoints

pub mod dto;
pub mod handlers;

pub use handlers::ReservationAppState;
