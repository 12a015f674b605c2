//! Service health endpoint

pub mod handlers;

pub use handlers::{HealthResponse, HealthState};
