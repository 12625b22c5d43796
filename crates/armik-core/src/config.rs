use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_max_iterations() -> u32 {
    100
}
const fn default_tolerance() -> f64 {
    0.01
}
const fn default_learning_rate() -> f64 {
    0.01
}
const fn default_perturbation() -> f64 {
    0.001
}
const fn default_true() -> bool {
    true
}
const fn default_lerp_speed() -> f64 {
    5.0
}
const fn default_amplitude() -> [f64; 3] {
    [0.3, 0.0, 0.3]
}
const fn default_frequency() -> [f64; 3] {
    [0.5, 0.7, 0.4]
}
fn default_dt() -> f64 {
    1.0 / 60.0
}
const fn default_duration() -> f64 {
    10.0
}

/// Upper bound of the stabilizer smoothing speed.
pub const MAX_LERP_SPEED: f64 = 10.0;

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} (must be finite and > 0)")))
    }
}

// ---------------------------------------------------------------------------
// SolverConfig
// ---------------------------------------------------------------------------

/// Gradient-descent IK parameters.
///
/// The defaults are the constants the boundary layer always solves with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum solver iterations (default: 100).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Linear distance at which the end effector counts as on target.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Step applied along the negative gradient.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Finite-difference step in radians.
    #[serde(default = "default_perturbation")]
    pub perturbation: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            learning_rate: default_learning_rate(),
            perturbation: default_perturbation(),
        }
    }
}

impl SolverConfig {
    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroIterations`] for a zero budget, or
    /// [`ConfigError::InvalidValue`] for a non-positive or non-finite rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        require_positive("solver.tolerance", self.tolerance)?;
        require_positive("solver.learning_rate", self.learning_rate)?;
        require_positive("solver.perturbation", self.perturbation)
    }
}

// ---------------------------------------------------------------------------
// StabilizerConfig
// ---------------------------------------------------------------------------

/// How the stabilizer blends fresh IK solutions into the commanded pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilizerConfig {
    /// Blend toward each solution instead of jumping to it.
    #[serde(default = "default_true")]
    pub smooth: bool,

    /// Exponential smoothing speed in 1/s, within `[0, 10]`.
    #[serde(default = "default_lerp_speed")]
    pub lerp_speed: f64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            smooth: true,
            lerp_speed: default_lerp_speed(),
        }
    }
}

impl StabilizerConfig {
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when `lerp_speed` is outside `[0, 10]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=MAX_LERP_SPEED).contains(&self.lerp_speed) {
            Ok(())
        } else {
            Err(ConfigError::invalid(
                "stabilizer.lerp_speed",
                format!("{} (must be within [0, {MAX_LERP_SPEED}])", self.lerp_speed),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// DisturbanceConfig
// ---------------------------------------------------------------------------

/// Per-axis sinusoidal base motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisturbanceConfig {
    /// Peak offset per axis, in scene units.
    #[serde(default = "default_amplitude")]
    pub amplitude: [f64; 3],

    /// Oscillation frequency per axis, in Hz.
    #[serde(default = "default_frequency")]
    pub frequency: [f64; 3],
}

impl Default for DisturbanceConfig {
    fn default() -> Self {
        Self {
            amplitude: default_amplitude(),
            frequency: default_frequency(),
        }
    }
}

impl DisturbanceConfig {
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for a non-finite component or a negative
    /// frequency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.amplitude.iter().any(|a| !a.is_finite()) {
            return Err(ConfigError::invalid(
                "disturbance.amplitude",
                "components must be finite",
            ));
        }
        if self.frequency.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(ConfigError::invalid(
                "disturbance.frequency",
                "components must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Timing and placement of a stabilization session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Step size in seconds (default: 1/60).
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Total simulated time in seconds (default: 10).
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Arm base position [x, y, z].
    #[serde(default)]
    pub base: [f64; 3],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            duration: default_duration(),
            base: [0.0; 3],
        }
    }
}

impl SessionConfig {
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when `dt` is not positive, `duration` is
    /// shorter than `dt`, or `base` has a non-finite component.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("session.dt", self.dt)?;
        if !self.duration.is_finite() || self.duration < self.dt {
            return Err(ConfigError::invalid(
                "session.duration",
                format!("{} (must be >= dt)", self.duration),
            ));
        }
        if self.base.iter().any(|b| !b.is_finite()) {
            return Err(ConfigError::invalid("session.base", "components must be finite"));
        }
        Ok(())
    }

    /// Number of whole steps the session runs for.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self) -> u64 {
        (self.duration / self.dt).round() as u64
    }
}

// ---------------------------------------------------------------------------
// ArmikConfig
// ---------------------------------------------------------------------------

/// Root configuration file. Every section is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmikConfig {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub stabilizer: StabilizerConfig,
    #[serde(default)]
    pub disturbance: DisturbanceConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl ArmikConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// The first section error found, in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver.validate()?;
        self.stabilizer.validate()?;
        self.disturbance.validate()?;
        self.session.validate()
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Toml`] on malformed input, otherwise any
    /// [`validate`](Self::validate) error.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise any
    /// [`from_toml_str`](Self::from_toml_str) error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
