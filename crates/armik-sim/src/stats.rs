//! Stabilization session statistics.
//!
//! [`SessionStats`] records per-step outcomes while a session runs: how many
//! ticks converged or failed, and how far the end effector drifted from its
//! anchor in the world frame.

use crate::stabilizer::TickOutcome;

// ---------------------------------------------------------------------------
// SessionStats
// ---------------------------------------------------------------------------

/// Cumulative statistics for one stabilization session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionStats {
    /// Steps taken while the session was running.
    pub steps: u64,
    /// Ticks whose IK solve converged.
    pub converged: u64,
    /// Ticks whose IK solve failed.
    pub failed: u64,
    /// Largest world-frame distance between end effector and anchor.
    pub max_tracking_error: f64,
    tracking_error_sum: f64,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStats {
    /// Create empty stats.
    pub const fn new() -> Self {
        Self {
            steps: 0,
            converged: 0,
            failed: 0,
            max_tracking_error: 0.0,
            tracking_error_sum: 0.0,
        }
    }

    /// Record one step.
    pub fn record(&mut self, outcome: &TickOutcome, tracking_error: f64) {
        self.steps += 1;
        match outcome {
            TickOutcome::Converged { .. } => self.converged += 1,
            TickOutcome::Failed { .. } => self.failed += 1,
            TickOutcome::Idle => {}
        }
        self.tracking_error_sum += tracking_error;
        self.max_tracking_error = self.max_tracking_error.max(tracking_error);
    }

    /// Mean tracking error over all recorded steps.
    pub fn mean_tracking_error(&self) -> Option<f64> {
        if self.steps == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(self.tracking_error_sum / self.steps as f64)
    }

    /// Fraction of steps whose IK solve converged.
    pub fn convergence_rate(&self) -> Option<f64> {
        if self.steps == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(self.converged as f64 / self.steps as f64)
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
