//! Integration test: drive the manipulator through its C entry points.
//!
//! Exercises the exported functions exactly as a C caller would, with raw
//! pointers and `c_int` counts, and checks that:
//! 1. Joint positions round out to `(joints + 1) * 3` doubles
//! 2. Null handles and bad counts are harmless
//! 3. IK writes its output buffer only on success
//! 4. Positions read back match the Rust-side arm for seeded random poses

use std::os::raw::c_int;
use std::ptr;

use armik_ffi::{
    arm_create, arm_debug, arm_destroy, arm_get_joint_count, arm_get_joint_positions,
    arm_set_angles, arm_solve_ik, ArmHandle,
};
use armik_test_utils::{assert_vec3_near, posed_arm, random_angles, ZERO_POSE_REACH};
use nalgebra::Vector3;

const POSITIONS_LEN: usize = (4 + 1) * 3;

fn positions(handle: *mut ArmHandle) -> (Vec<f64>, c_int) {
    let mut buf = vec![f64::NAN; POSITIONS_LEN];
    let mut count: c_int = -1;
    unsafe { arm_get_joint_positions(handle, buf.as_mut_ptr(), &mut count) };
    (buf, count)
}

fn end_effector(buf: &[f64]) -> Vector3<f64> {
    Vector3::new(buf[12], buf[13], buf[14])
}

#[test]
fn create_query_destroy() {
    let handle = arm_create(1.0, 2.0, 3.0);
    assert!(!handle.is_null());
    assert_eq!(unsafe { arm_get_joint_count(handle) }, 4);

    let (buf, count) = positions(handle);
    assert_eq!(count, 15);
    assert_vec3_near(&Vector3::new(buf[0], buf[1], buf[2]), &Vector3::new(1.0, 2.0, 3.0), 1e-12);
    assert_vec3_near(
        &end_effector(&buf),
        &Vector3::new(1.0, 2.0 + ZERO_POSE_REACH, 3.0),
        1e-12,
    );

    unsafe { arm_destroy(handle) };
}

#[test]
fn set_angles_moves_end_effector() {
    let handle = arm_create(0.0, 0.0, 0.0);
    let angles = [std::f64::consts::FRAC_PI_2, 0.0, 0.0, 0.0];
    unsafe { arm_set_angles(handle, angles.as_ptr(), 4) };

    let (buf, _) = positions(handle);
    assert_vec3_near(&end_effector(&buf), &Vector3::new(-8.5, 0.0, 0.0), 1e-9);
    unsafe { arm_destroy(handle) };
}

#[test]
fn null_handle_is_harmless() {
    let null: *mut ArmHandle = ptr::null_mut();
    let angles = [0.1; 4];
    let mut out = [0.5; 4];

    unsafe {
        arm_set_angles(null, angles.as_ptr(), 4);
        assert_eq!(arm_get_joint_count(null), 0);
        assert_eq!(arm_solve_ik(null, 0.0, 8.5, 0.0, out.as_mut_ptr(), 4), 0);
        arm_debug(null);
        arm_destroy(null);
    }
    assert_eq!(out, [0.5; 4]);

    let (buf, count) = positions(null);
    assert_eq!(count, -1);
    assert!(buf.iter().all(|v| v.is_nan()));
}

#[test]
fn partial_count_updates_leading_joints_only() {
    let handle = arm_create(0.0, 0.0, 0.0);
    let all = [0.1, 0.2, 0.3, 0.4];
    let lead = [-0.5, 0.6];
    unsafe {
        arm_set_angles(handle, all.as_ptr(), 4);
        arm_set_angles(handle, lead.as_ptr(), 2);
    }

    let expected = posed_arm(Vector3::zeros(), &[-0.5, 0.6, 0.3, 0.4]);
    let (buf, _) = positions(handle);
    assert_vec3_near(&end_effector(&buf), &expected.forward_kinematics(), 1e-12);
    unsafe { arm_destroy(handle) };
}

#[test]
fn seeded_random_poses_match_rust_side() {
    for seed in 0..8 {
        let angles = random_angles(seed);
        let base = Vector3::new(0.5, -1.0, 2.0);
        let handle = arm_create(base.x, base.y, base.z);
        let count = c_int::try_from(angles.len()).unwrap();
        unsafe { arm_set_angles(handle, angles.as_ptr(), count) };

        let expected = posed_arm(base, &angles).joint_world_positions();
        let (buf, used) = positions(handle);
        assert_eq!(used, 15);
        for (i, p) in expected.iter().enumerate() {
            let got = Vector3::new(buf[i * 3], buf[i * 3 + 1], buf[i * 3 + 2]);
            assert_vec3_near(&got, p, 1e-12);
        }
        unsafe { arm_destroy(handle) };
    }
}

#[test]
fn bad_angle_inputs_are_ignored() {
    let handle = arm_create(0.0, 0.0, 0.0);
    let angles = [1.0; 4];
    unsafe {
        arm_set_angles(handle, ptr::null(), 4);
        arm_set_angles(handle, angles.as_ptr(), -1);
    }
    let (buf, _) = positions(handle);
    assert_vec3_near(&end_effector(&buf), &Vector3::new(0.0, ZERO_POSE_REACH, 0.0), 1e-12);
    unsafe { arm_destroy(handle) };
}

#[test]
fn solve_ik_rejects_count_mismatch() {
    let handle = arm_create(0.0, 0.0, 0.0);
    let mut out = [9.0; 3];
    let ok = unsafe { arm_solve_ik(handle, 0.0, 8.5, 0.0, out.as_mut_ptr(), 3) };
    assert_eq!(ok, 0);
    assert_eq!(out, [9.0; 3]);
    unsafe { arm_destroy(handle) };
}

#[test]
fn solve_ik_zero_pose_target_converges() {
    let handle = arm_create(0.0, 0.0, 0.0);
    let mut out = [f64::NAN; 4];

    let ok = unsafe { arm_solve_ik(handle, 0.0, ZERO_POSE_REACH, 0.0, out.as_mut_ptr(), 4) };
    assert_eq!(ok, 1);
    assert_eq!(out, [0.0; 4]);

    // The returned buffer is exactly the pose left on the arm.
    let reapplied = arm_create(0.0, 0.0, 0.0);
    unsafe { arm_set_angles(reapplied, out.as_ptr(), 4) };
    let (buf, _) = positions(handle);
    let (expected, _) = positions(reapplied);
    assert_eq!(buf, expected);
    assert!((end_effector(&buf) - Vector3::new(0.0, ZERO_POSE_REACH, 0.0)).norm() < 0.01);

    unsafe {
        arm_destroy(reapplied);
        arm_destroy(handle);
    }
}

#[test]
fn solve_ik_success_fills_buffer() {
    let handle = arm_create(0.0, 0.0, 0.0);
    let theta: f64 = 0.05;
    let target = Vector3::new(-8.5 * theta.sin(), 8.5 * theta.cos(), 0.0);
    let mut out = [f64::NAN; 4];

    let ok = unsafe { arm_solve_ik(handle, target.x, target.y, target.z, out.as_mut_ptr(), 4) };
    assert_eq!(ok, 1);
    assert!(out.iter().all(|a| a.is_finite()));

    let (buf, _) = positions(handle);
    assert!((end_effector(&buf) - target).norm() < 0.01);
    unsafe { arm_destroy(handle) };
}

#[test]
fn solve_ik_failure_leaves_buffer() {
    let handle = arm_create(0.0, 0.0, 0.0);
    let mut out = [0.25; 4];
    let ok = unsafe { arm_solve_ik(handle, 0.0, 100.0, 0.0, out.as_mut_ptr(), 4) };
    assert_eq!(ok, 0);
    assert_eq!(out, [0.25; 4]);
    unsafe { arm_destroy(handle) };
}

#[test]
fn debug_on_live_handle_does_not_panic() {
    let handle = arm_create(0.0, 0.0, 0.0);
    unsafe { arm_debug(handle) };
    unsafe { arm_destroy(handle) };
}
