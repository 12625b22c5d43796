// armik-core: errors and configuration shared across the armik crates.

pub mod config;
pub mod error;

pub use config::{ArmikConfig, DisturbanceConfig, SessionConfig, SolverConfig, StabilizerConfig};
pub use error::{ConfigError, UsageError};
