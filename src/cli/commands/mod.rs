//! CLI command implementations.

pub mod document;
pub mod embed;
pub mod init;
pub mod search;
pub mod seed;
