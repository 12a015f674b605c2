//! Application layer: business services over the domain

pub mod services;

pub use services::{
    BillingLedger, FrontDeskService, IntervalClaim, RoomInventoryIndex, SharedRoomInventoryIndex,
};
