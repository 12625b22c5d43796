//! Deterministic RNG utilities for reproducible tests.

use std::f64::consts::PI;

use armik_ik::JOINT_COUNT;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Deterministic joint angles in `[-π, π)`, one per joint of the fixed chain.
///
/// Values may fall outside individual joint limits; the arm clamps them.
pub fn random_angles(seed: u64) -> [f64; JOINT_COUNT] {
    let mut rng = seeded_rng(seed);
    std::array::from_fn(|_| rng.gen_range(-PI..PI))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
