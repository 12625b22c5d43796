//! C ABI over [`Manipulator`].
//!
//! Each handle owns one boxed manipulator. Every entry point tolerates a null
//! handle (no-op or zero result) and catches panics before they reach the
//! caller. The declarations live in `include/armik.h`.
//!
//! Handles are not synchronized; callers must not use one handle from two
//! threads at once.

use std::io;
use std::os::raw::c_int;
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use nalgebra::Vector3;
use tracing::{debug, error, warn};

use armik_core::UsageError;
use armik_ik::{ArmReport, Manipulator};

/// Opaque handle handed across the boundary.
pub struct ArmHandle {
    arm: Manipulator,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `f`, returning `fallback` if it panics.
fn guard<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        error!("panic caught at C boundary");
        fallback
    })
}

/// # Safety
///
/// `handle` must be null or a live pointer from [`arm_create`].
unsafe fn arm_mut<'a>(handle: *mut ArmHandle) -> Result<&'a mut Manipulator, UsageError> {
    handle
        .as_mut()
        .map(|h| &mut h.arm)
        .ok_or(UsageError::NullHandle)
}

fn dof_as_c_int(arm: &Manipulator) -> c_int {
    c_int::try_from(arm.dof()).unwrap_or(c_int::MAX)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Create a manipulator based at `(x, y, z)`. Release with [`arm_destroy`].
#[no_mangle]
pub extern "C" fn arm_create(x: f64, y: f64, z: f64) -> *mut ArmHandle {
    guard(std::ptr::null_mut(), || {
        let handle = Box::new(ArmHandle {
            arm: Manipulator::new(Vector3::new(x, y, z)),
        });
        let ptr = Box::into_raw(handle);
        debug!(?ptr, x, y, z, "arm created");
        ptr
    })
}

/// Destroy a handle. Null is a no-op.
///
/// # Safety
///
/// `handle` must be null or a pointer returned by [`arm_create`] that has not
/// been destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn arm_destroy(handle: *mut ArmHandle) {
    if handle.is_null() {
        return;
    }
    debug!(ptr = ?handle, "arm destroyed");
    drop(Box::from_raw(handle));
}

// ---------------------------------------------------------------------------
// Queries and commands
// ---------------------------------------------------------------------------

/// Assign the leading `count` joint angles (radians). Each is clamped.
///
/// Null handle, null `angles`, or a negative `count` is a no-op.
///
/// # Safety
///
/// `handle` must be null or live. When non-null, `angles` must point to at
/// least `count` readable doubles.
#[no_mangle]
pub unsafe extern "C" fn arm_set_angles(handle: *mut ArmHandle, angles: *const f64, count: c_int) {
    let Ok(arm) = arm_mut(handle) else { return };
    let Ok(len) = usize::try_from(count) else { return };
    if angles.is_null() {
        return;
    }
    let values = slice::from_raw_parts(angles, len);
    guard((), || arm.set_angles(values));
}

/// Write base and link-end positions as `x, y, z` triples into `out` and the
/// number of doubles written into `out_count`.
///
/// # Safety
///
/// `handle` must be null or live. `out` must have room for
/// `(arm_get_joint_count + 1) * 3` doubles; `out_count` must be writable.
#[no_mangle]
pub unsafe extern "C" fn arm_get_joint_positions(
    handle: *mut ArmHandle,
    out: *mut f64,
    out_count: *mut c_int,
) {
    let Ok(arm) = arm_mut(handle) else { return };
    if out.is_null() || out_count.is_null() {
        debug!(error = %UsageError::NullBuffer("joint positions"), "ignored");
        return;
    }

    let positions = guard(Vec::new(), || arm.joint_world_positions());
    let buf = slice::from_raw_parts_mut(out, positions.len() * 3);
    for (chunk, p) in buf.chunks_exact_mut(3).zip(&positions) {
        chunk.copy_from_slice(&[p.x, p.y, p.z]);
    }
    *out_count = c_int::try_from(buf.len()).unwrap_or(c_int::MAX);
}

/// Number of joints, or 0 for a null handle.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn arm_get_joint_count(handle: *mut ArmHandle) -> c_int {
    arm_mut(handle).map_or(0, |arm| dof_as_c_int(arm))
}

/// Solve IK toward `(tx, ty, tz)` from the current pose.
///
/// Returns 1 on convergence and copies the solution into `angles`; returns 0
/// otherwise, leaving `angles` untouched. `count` must equal the joint count.
/// The manipulator keeps the solver's final pose either way.
///
/// # Safety
///
/// `handle` must be null or live. `angles` must point to `count` writable
/// doubles.
#[no_mangle]
pub unsafe extern "C" fn arm_solve_ik(
    handle: *mut ArmHandle,
    tx: f64,
    ty: f64,
    tz: f64,
    angles: *mut f64,
    count: c_int,
) -> c_int {
    let Ok(arm) = arm_mut(handle) else { return 0 };

    let expected = arm.dof();
    if usize::try_from(count).ok() != Some(expected) {
        let err = UsageError::AngleCountMismatch {
            expected,
            got: i64::from(count),
        };
        warn!(%err, "IK request rejected");
        return 0;
    }
    if angles.is_null() {
        warn!(err = %UsageError::NullBuffer("IK angles"), "IK request rejected");
        return 0;
    }

    let target = Vector3::new(tx, ty, tz);
    let Some(result) = guard(None, || Some(arm.solve_ik(&target))) else {
        return 0;
    };
    if !result.converged {
        return 0;
    }
    slice::from_raw_parts_mut(angles, expected).copy_from_slice(&result.joint_positions);
    1
}

/// Print the diagnostic report to stdout. Null is a no-op.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn arm_debug(handle: *mut ArmHandle) {
    let Ok(arm) = arm_mut(handle) else { return };
    let report = ArmReport::capture(arm);
    if let Err(err) = report.write_to(&mut io::stdout().lock()) {
        debug!(%err, "failed to write arm report");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
