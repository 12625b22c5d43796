//! Ready-made arms and vector assertions.

use approx::relative_eq;
use armik_ik::Manipulator;
use nalgebra::Vector3;

/// End-effector height of the fixed chain at the zero pose.
pub const ZERO_POSE_REACH: f64 = 8.5;

/// The fixed chain based at the origin, all joints at zero.
pub fn origin_arm() -> Manipulator {
    Manipulator::default()
}

/// The fixed chain at `base` with `angles` applied (clamped by the arm).
pub fn posed_arm(base: Vector3<f64>, angles: &[f64]) -> Manipulator {
    let mut arm = Manipulator::new(base);
    arm.set_angles(angles);
    arm
}

/// Assert two vectors agree component-wise within `epsilon`.
///
/// # Panics
///
/// Panics with both vectors in the message when any component differs.
#[track_caller]
pub fn assert_vec3_near(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    let near = (0..3).all(|i| relative_eq!(actual[i], expected[i], epsilon = epsilon));
    assert!(
        near,
        "vectors differ beyond {epsilon}: actual ({}, {}, {}), expected ({}, {}, {})",
        actual.x, actual.y, actual.z, expected.x, expected.y, expected.z
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_arm_reaches_zero_pose_height() {
        let arm = origin_arm();
        assert_vec3_near(
            &arm.forward_kinematics(),
            &Vector3::new(0.0, ZERO_POSE_REACH, 0.0),
            1e-12,
        );
    }

    #[test]
    fn posed_arm_applies_angles() {
        let arm = posed_arm(Vector3::new(1.0, 0.0, 0.0), &[0.1, 0.2]);
        assert_eq!(arm.base_position(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(arm.angles(), vec![0.1, 0.2, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "vectors differ")]
    fn assert_vec3_near_detects_mismatch() {
        assert_vec3_near(&Vector3::zeros(), &Vector3::new(0.0, 0.0, 1.0), 1e-6);
    }
}
