use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("max_iterations must be > 0")]
    ZeroIterations,

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Caller mistakes at the boundary between a host and the kinematic core.
///
/// Copy + static messages; these are reported, never propagated as panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Null manipulator handle")]
    NullHandle,

    #[error("Angle count mismatch: expected {expected}, got {got}")]
    AngleCountMismatch { expected: usize, got: i64 },

    #[error("Null buffer passed for {0}")]
    NullBuffer(&'static str),
}
