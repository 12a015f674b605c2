//! Infrastructure layer: storage implementations

pub mod storage;

pub use storage::{InMemoryRepositories, DEMO_PROPERTY_ID};
