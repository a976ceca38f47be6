//! Domain layer for docrag
//!
//! Document model, errors, and the ports that storage and embedding
//! adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
