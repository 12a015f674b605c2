//! Application services
//!
//! - `inventory`: authoritative room-interval claim registry
//! - `billing`: append-only ledger operations and balance computation
//! - `front_desk`: orchestration of the guest-facing operations

pub mod billing;
pub mod front_desk;
pub mod inventory;

pub use billing::BillingLedger;
pub use front_desk::FrontDeskService;
pub use inventory::{IntervalClaim, RoomInventoryIndex, SharedRoomInventoryIndex};
