//! Integration test: hold the end effector while the base shakes.
//!
//! Uses the default disturbance (0.3 amplitude on x and z) on an arm posed
//! away from its singular straight-up configuration, and checks that:
//! 1. Stabilizing, smoothed or not, keeps the end effector closer to its
//!    anchor than leaving the arm alone
//! 2. The arm's joint limits hold throughout, from seeded random poses too
//! 3. Two identical runs produce identical statistics

use armik_core::ArmikConfig;
use armik_sim::{SinDisturbance, StabilizationSession};
use armik_test_utils::{assert_vec3_near, origin_arm, posed_arm, random_angles, ZERO_POSE_REACH};
use nalgebra::Vector3;

const POSE: [f64; 4] = [0.3, 0.4, 0.6, 0.2];

fn short_config() -> ArmikConfig {
    let mut config = ArmikConfig::default();
    config.session.duration = 2.0;
    config
}

/// World-frame drift of an arm that never reacts to the disturbance.
#[allow(clippy::cast_precision_loss)]
fn passive_mean_error(config: &ArmikConfig) -> f64 {
    let mut disturbance = SinDisturbance::new(&config.disturbance);
    disturbance.play(0.0);
    let steps = config.session.steps();
    let total: f64 = (1..=steps)
        .map(|i| disturbance.offset(i as f64 * config.session.dt).norm())
        .sum();
    total / steps as f64
}

fn assert_beats_passive(config: &ArmikConfig) {
    let passive = passive_mean_error(config);
    let mut session = StabilizationSession::with_arm(config, posed_arm(Vector3::zeros(), &POSE));
    let stats = session.run().clone();

    let active = stats.mean_tracking_error().unwrap();
    assert!(
        active < 0.5 * passive,
        "stabilized error {active} not well below passive error {passive}"
    );
    assert!(stats.converged > 0);
}

#[test]
fn unsmoothed_stabilizer_beats_passive_arm() {
    let mut config = short_config();
    config.stabilizer.smooth = false;
    assert_beats_passive(&config);
}

#[test]
fn smoothed_stabilizer_beats_passive_arm() {
    assert_beats_passive(&short_config());
}

#[test]
fn joint_limits_hold_during_session() {
    let config = short_config();
    let mut session = StabilizationSession::with_arm(&config, posed_arm(Vector3::zeros(), &POSE));
    session.start();
    for _ in 0..config.session.steps() {
        session.step();
        for (joint, angle) in session.arm().joints().iter().zip(session.arm().angles()) {
            let limit = joint.limit();
            assert!(angle >= limit.low() && angle <= limit.high());
        }
    }
    session.stop();
}

#[test]
fn random_start_poses_stay_within_limits() {
    let mut config = ArmikConfig::default();
    config.session.duration = 0.5;

    for seed in 0..4 {
        let arm = posed_arm(Vector3::zeros(), &random_angles(seed));
        let mut session = StabilizationSession::with_arm(&config, arm);
        let stats = session.run().clone();

        assert_eq!(stats.steps, config.session.steps());
        assert_eq!(stats.converged + stats.failed, stats.steps);
        for (joint, angle) in session.arm().joints().iter().zip(session.arm().angles()) {
            let limit = joint.limit();
            assert!(
                angle >= limit.low() && angle <= limit.high(),
                "seed {seed}: angle {angle} outside limit"
            );
        }
    }
}

#[test]
fn sessions_are_deterministic() {
    let config = short_config();
    let mut a = StabilizationSession::with_arm(&config, posed_arm(Vector3::zeros(), &POSE));
    let mut b = StabilizationSession::with_arm(&config, posed_arm(Vector3::zeros(), &POSE));
    assert_eq!(a.run(), b.run());
    assert_eq!(a.arm(), b.arm());
}

#[test]
fn anchor_is_initial_end_effector() {
    let arm = posed_arm(Vector3::new(1.0, -1.0, 0.5), &POSE);
    let expected = arm.forward_kinematics();
    let mut session = StabilizationSession::with_arm(&short_config(), arm);
    session.start();
    let anchor = session.stabilizer().anchor_position().unwrap();
    assert_vec3_near(&anchor, &expected, 1e-12);
}

#[test]
fn zero_pose_anchor_sits_at_full_reach() {
    let mut session = StabilizationSession::with_arm(&short_config(), origin_arm());
    session.start();
    let anchor = session.stabilizer().anchor_position().unwrap();
    assert_vec3_near(&anchor, &Vector3::new(0.0, ZERO_POSE_REACH, 0.0), 1e-12);
}
