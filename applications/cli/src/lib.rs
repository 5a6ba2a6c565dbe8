//! Sonance CLI Library
//!
//! Volume conversion and session simulation behind the `sonance` binary.
//!
//! This library exposes the command implementations for testing purposes.

pub mod config;
pub mod convert;
pub mod error;
pub mod simulate;

// Re-export commonly used types for convenience
pub use config::SessionConfig;
pub use error::{CliError, Result};
pub use simulate::{run, SimulationReport};
