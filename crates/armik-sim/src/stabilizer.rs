//! End-effector hold: re-solve IK every tick toward a fixed world anchor.

use nalgebra::Vector3;

use armik_core::StabilizerConfig;
use armik_ik::{GradientDescentSolver, Manipulator};

/// What a single [`Stabilizer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not anchored; nothing was touched.
    Idle,
    /// IK converged and the commanded pose moved toward the solution.
    Converged { iterations: u32, error: f64 },
    /// IK failed; the commanded pose is unchanged and the arm keeps the
    /// solver's last iterate as the next warm start.
    Failed { error: f64 },
}

impl TickOutcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Holds an arm's end effector at an anchor captured by [`anchor`](Self::anchor).
#[derive(Debug, Clone)]
pub struct Stabilizer {
    config: StabilizerConfig,
    anchor: Option<Vector3<f64>>,
    commanded: Vec<f64>,
}

impl Stabilizer {
    pub const fn new(config: StabilizerConfig) -> Self {
        Self {
            config,
            anchor: None,
            commanded: Vec::new(),
        }
    }

    pub const fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// Record the arm's current end effector and angles.
    pub fn anchor(&mut self, arm: &Manipulator) {
        self.anchor = Some(arm.forward_kinematics());
        self.commanded = arm.angles();
    }

    /// Stop holding. The arm keeps its last commanded pose.
    pub fn release(&mut self) {
        self.anchor = None;
    }

    pub const fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    pub const fn anchor_position(&self) -> Option<Vector3<f64>> {
        self.anchor
    }

    /// Angles most recently applied by the stabilizer.
    pub fn commanded(&self) -> &[f64] {
        &self.commanded
    }

    /// Drive `arm` toward `target` for one tick of length `dt` seconds.
    ///
    /// A failed solve is not rolled back, so descent carries over into the
    /// next tick.
    ///
    /// With smoothing enabled each angle moves from the commanded pose toward
    /// the IK solution by `1 - exp(-lerp_speed * dt)` of the gap.
    pub fn tick(
        &mut self,
        arm: &mut Manipulator,
        solver: &GradientDescentSolver,
        target: &Vector3<f64>,
        dt: f64,
    ) -> TickOutcome {
        if self.anchor.is_none() {
            return TickOutcome::Idle;
        }

        let result = solver.solve(arm, target);
        if !result.converged {
            return TickOutcome::Failed {
                error: result.position_error,
            };
        }

        let solution = arm.angles();
        if self.config.smooth {
            let alpha = 1.0 - (-self.config.lerp_speed * dt).exp();
            for (angle, goal) in self.commanded.iter_mut().zip(&solution) {
                *angle += (goal - *angle) * alpha;
            }
        } else {
            self.commanded = solution;
        }
        arm.set_angles(&self.commanded);

        TickOutcome::Converged {
            iterations: result.iterations,
            error: result.position_error,
        }
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
