//! Storage implementations

pub mod memory;

pub use memory::{InMemoryRepositories, DEMO_PROPERTY_ID};
