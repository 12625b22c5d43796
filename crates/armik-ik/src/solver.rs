//! Finite-difference gradient-descent IK solver.
//!
//! Minimizes the squared distance between the end effector and a target
//! position. Every candidate configuration is evaluated by applying it to the
//! manipulator (so joint limits clamp it) and running forward kinematics.

use nalgebra::Vector3;
use tracing::{debug, trace};

use armik_core::SolverConfig;

use crate::chain::Manipulator;

/// Result of an IK solve.
#[derive(Debug, Clone, PartialEq)]
pub struct IkResult {
    /// Working angle vector at exit. On success this is what was applied to
    /// the arm; on failure it is the last attempted iterate.
    pub joint_positions: Vec<f64>,
    /// Whether the end effector came within tolerance.
    pub converged: bool,
    /// Iterations consumed (`max_iterations` on failure).
    pub iterations: u32,
    /// Final end-effector distance to the target.
    pub position_error: f64,
}

/// Gradient-descent IK solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientDescentSolver {
    config: SolverConfig,
}

impl GradientDescentSolver {
    /// Create a new solver with the given configuration.
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve IK for `arm` toward `target`, warm-starting from its current angles.
    ///
    /// The arm is mutated throughout: on success it holds the converged
    /// angles, on failure the final iterate. Nothing is rolled back.
    pub fn solve(&self, arm: &mut Manipulator, target: &Vector3<f64>) -> IkResult {
        let SolverConfig {
            max_iterations,
            tolerance,
            learning_rate,
            perturbation,
        } = self.config;

        let mut q = arm.angles();
        let mut gradient = vec![0.0; q.len()];
        let mut cost = squared_distance(&arm.forward_kinematics(), target);

        for iteration in 0..max_iterations {
            let error = cost.sqrt();
            if error < tolerance {
                arm.set_angles(&q);
                debug!(iterations = iteration, error, "IK converged");
                return IkResult {
                    joint_positions: q,
                    converged: true,
                    iterations: iteration,
                    position_error: error,
                };
            }

            // Forward difference, one joint at a time.
            for i in 0..q.len() {
                let backup = q[i];
                q[i] += perturbation;
                arm.set_angles(&q);
                let perturbed = squared_distance(&arm.forward_kinematics(), target);
                gradient[i] = (perturbed - cost) / perturbation;
                q[i] = backup;
            }

            for (angle, g) in q.iter_mut().zip(&gradient) {
                *angle -= learning_rate * g;
            }
            arm.set_angles(&q);
            cost = squared_distance(&arm.forward_kinematics(), target);
            trace!(iteration, error = cost.sqrt(), "IK step");
        }

        let error = cost.sqrt();
        debug!(iterations = max_iterations, error, "IK did not converge");
        IkResult {
            joint_positions: q,
            converged: false,
            iterations: max_iterations,
            position_error: error,
        }
    }
}

/// Squared Euclidean distance, summed x, y, z in that order.
fn squared_distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    (a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y) + (a.z - b.z) * (a.z - b.z)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
