//! Infrastructure layer
//!
//! Configuration loading, logging setup and service wiring.

pub mod config;
pub mod logging;
pub mod setup;

pub use config::{ConfigError, ConfigLoader};
pub use logging::LoggerImpl;
pub use setup::{AppContext, SetupPaths};
