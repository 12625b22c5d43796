//! A timed stabilization run: shake the base, hold the end effector.
//!
//! The arm's base stays fixed in its own frame. Each step the disturbance
//! offset `d` is computed and the end effector is driven toward
//! `anchor - d`, which is where the world anchor appears from a base
//! displaced by `d`. Tracking error is measured back in the world frame as
//! `|fk + d - anchor|`.

use nalgebra::Vector3;
use tracing::{debug, info};

use armik_core::{ArmikConfig, SessionConfig};
use armik_ik::{GradientDescentSolver, Manipulator};

use crate::disturbance::SinDisturbance;
use crate::stabilizer::{Stabilizer, TickOutcome};
use crate::stats::SessionStats;

/// Owns an arm, its stabilizer and a disturbance, and steps them together.
#[derive(Debug, Clone)]
pub struct StabilizationSession {
    config: SessionConfig,
    arm: Manipulator,
    solver: GradientDescentSolver,
    stabilizer: Stabilizer,
    disturbance: SinDisturbance,
    time: f64,
    running: bool,
    stats: SessionStats,
}

impl StabilizationSession {
    /// Build a stopped session with a fresh arm at `config.session.base`.
    pub fn new(config: &ArmikConfig) -> Self {
        let arm = Manipulator::new(Vector3::from(config.session.base));
        Self::with_arm(config, arm)
    }

    /// Build a stopped session around an existing arm.
    pub fn with_arm(config: &ArmikConfig, arm: Manipulator) -> Self {
        Self {
            config: config.session,
            arm,
            solver: GradientDescentSolver::new(config.solver),
            stabilizer: Stabilizer::new(config.stabilizer),
            disturbance: SinDisturbance::new(&config.disturbance),
            time: 0.0,
            running: false,
            stats: SessionStats::new(),
        }
    }

    pub const fn arm(&self) -> &Manipulator {
        &self.arm
    }

    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub const fn stabilizer(&self) -> &Stabilizer {
        &self.stabilizer
    }

    pub const fn disturbance(&self) -> &SinDisturbance {
        &self.disturbance
    }

    /// Simulated time in seconds.
    pub const fn time(&self) -> f64 {
        self.time
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Anchor the end effector where it is and start the disturbance.
    /// No-op while running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.stabilizer.anchor(&self.arm);
        self.disturbance.play(self.time);
        self.running = true;
        info!(
            time = self.time,
            anchor = ?self.arm.forward_kinematics(),
            "stabilization started"
        );
    }

    /// Release the anchor and stop the disturbance. No-op while stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.stabilizer.release();
        self.disturbance.stop();
        self.running = false;
        info!(
            time = self.time,
            steps = self.stats.steps,
            failed = self.stats.failed,
            "stabilization stopped"
        );
    }

    /// Advance time by one `dt` and tick the stabilizer.
    ///
    /// Stats are recorded only while running.
    pub fn step(&mut self) -> TickOutcome {
        self.time += self.config.dt;
        let Some(anchor) = self.stabilizer.anchor_position() else {
            return TickOutcome::Idle;
        };

        let offset = self.disturbance.offset(self.time);
        let target = anchor - offset;
        let outcome = self
            .stabilizer
            .tick(&mut self.arm, &self.solver, &target, self.config.dt);

        if let TickOutcome::Failed { error } = outcome {
            debug!(time = self.time, error, "stabilizer IK failed");
        }

        let tracking_error = (self.arm.forward_kinematics() + offset - anchor).norm();
        self.stats.record(&outcome, tracking_error);
        outcome
    }

    /// Start, step for the configured duration, stop.
    pub fn run(&mut self) -> &SessionStats {
        self.start();
        for _ in 0..self.config.steps() {
            self.step();
        }
        self.stop();
        &self.stats
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
