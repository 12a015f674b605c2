//! # Front Desk Operations Service
//!
//! Reservation lifecycle and room-inventory allocation engine for a
//! hotel property, exposed over a REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Inventory index, billing ledger, front-desk service
//! - **infrastructure**: Storage backends
//! - **interfaces**: REST API with Swagger documentation
//! - **support**: Graceful shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export storage for easy access
pub use infrastructure::storage::InMemoryRepositories;

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export the core services
pub use application::services::{
    BillingLedger, FrontDeskService, RoomInventoryIndex, SharedRoomInventoryIndex,
};
