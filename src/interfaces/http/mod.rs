//! HTTP REST API interfaces
//!
//! - `common`: Response envelope and validated JSON extraction
//! - `modules`: Request handlers grouped per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
