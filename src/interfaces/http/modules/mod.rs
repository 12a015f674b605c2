//! HTTP API modules, one per resource area

pub mod front_desk;
pub mod health;
pub mod metrics;
pub mod reservations;
pub mod rooms;
