//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON console formatting on stderr
//! - Daily rolling JSON log files

pub mod logger;

pub use logger::{LogFormat, LoggerImpl};
