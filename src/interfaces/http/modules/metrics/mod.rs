//! Prometheus scrape endpoint

pub mod handlers;

pub use handlers::MetricsState;
