//! Base-disturbance stabilization for the armik manipulator.
//!
//! A [`SinDisturbance`] shakes the arm's base while a [`Stabilizer`]
//! re-solves IK every tick to keep the end effector at a world-space anchor.
//! [`StabilizationSession`] ties the two together on a fixed time step and
//! collects [`SessionStats`].

pub mod disturbance;
pub mod session;
pub mod stabilizer;
pub mod stats;

pub use disturbance::SinDisturbance;
pub use session::StabilizationSession;
pub use stabilizer::{Stabilizer, TickOutcome};
pub use stats::SessionStats;
