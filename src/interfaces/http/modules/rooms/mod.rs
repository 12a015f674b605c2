//! Room inventory and room-type endpoints

pub mod dto;
pub mod handlers;

pub use handlers::RoomAppState;
