//! Shared test fixtures and utilities for armik crates.
//!
//! Provides arm fixtures, vector assertions, and deterministic RNG setup.

pub mod fixtures;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use fixtures::{assert_vec3_near, origin_arm, posed_arm, ZERO_POSE_REACH};
pub use rng::{random_angles, seeded_rng};
