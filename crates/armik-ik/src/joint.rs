//! Single rotational degree of freedom about a principal axis.

use nalgebra::Vector3;

use crate::limit::AngleLimit;

/// Principal axis a [`Joint`] rotates about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Right-handed rotation of `v` by `angle` radians about this axis.
    #[must_use]
    pub fn rotate(self, v: Vector3<f64>, angle: f64) -> Vector3<f64> {
        let (s, c) = angle.sin_cos();
        match self {
            Self::X => Vector3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c),
            Self::Y => Vector3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c),
            Self::Z => Vector3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z),
        }
    }

    /// Single-letter name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// A revolute joint: fixed axis, current angle, and its limit.
///
/// The stored angle is always post-clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    axis: Axis,
    angle: f64,
    limit: AngleLimit,
}

impl Joint {
    /// Create a joint at angle 0 (clamped into `limit`).
    #[must_use]
    pub fn new(axis: Axis, limit: AngleLimit) -> Self {
        Self {
            axis,
            angle: limit.apply(0.0),
            limit,
        }
    }

    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub const fn limit(&self) -> &AngleLimit {
        &self.limit
    }

    /// Current angle (rad), already clamped.
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Store `angle` clamped into the limit. Out-of-range input is never rejected.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = self.limit.apply(angle);
    }

    /// Rotate `direction` by the current angle about the joint axis.
    #[must_use]
    pub fn rotate(&self, direction: Vector3<f64>) -> Vector3<f64> {
        self.axis.rotate(direction, self.angle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
