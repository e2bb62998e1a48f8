//! Tune Stream command-line client
//!
//! Configuration, the simulated media backend, and playback source parsing
//! used by the `tune` binary.

pub mod config;
pub mod error;
pub mod simulator;
pub mod source;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use simulator::SimulatedBackend;
pub use source::PlaySource;
