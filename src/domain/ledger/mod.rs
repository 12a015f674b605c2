//! Billing ledger aggregate: entry entity and repository trait

pub mod model;
pub mod repository;

pub use model::{EntryKind, LedgerEntry};
pub use repository::LedgerRepository;
