//! Sinusoidal base disturbance.
//!
//! Produces a per-axis displacement `amplitude ⊙ sin(2π · frequency · t)`
//! measured from the moment the disturbance starts playing. The offset is
//! applied to the arm's base by the caller; the arm itself never moves.

use std::f64::consts::TAU;

use nalgebra::Vector3;

use armik_core::DisturbanceConfig;

/// Time-driven sinusoidal displacement of the arm base.
#[derive(Clone, Debug)]
pub struct SinDisturbance {
    /// Peak displacement per axis (scene units).
    pub amplitude: Vector3<f64>,
    /// Oscillation frequency per axis (Hz).
    pub frequency: Vector3<f64>,
    /// Time at which playback started, `None` while stopped.
    started_at: Option<f64>,
}

impl SinDisturbance {
    /// Create a stopped disturbance.
    pub fn new(config: &DisturbanceConfig) -> Self {
        Self {
            amplitude: Vector3::from(config.amplitude),
            frequency: Vector3::from(config.frequency),
            started_at: None,
        }
    }

    /// Start playing with phase zero at time `t0`. Restarts if already playing.
    pub fn play(&mut self, t0: f64) {
        self.started_at = Some(t0);
    }

    /// Stop playing. The offset returns to zero.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub const fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    /// Base displacement at absolute time `t`. Zero while stopped.
    pub fn offset(&self, t: f64) -> Vector3<f64> {
        let Some(t0) = self.started_at else {
            return Vector3::zeros();
        };
        let elapsed = t - t0;
        self.amplitude
            .zip_map(&self.frequency, |amp, freq| amp * (TAU * freq * elapsed).sin())
    }

    /// Upper bound on the offset magnitude.
    pub fn peak(&self) -> f64 {
        self.amplitude.norm()
    }
}

impl Default for SinDisturbance {
    fn default() -> Self {
        Self::new(&DisturbanceConfig::default())
    }
}
