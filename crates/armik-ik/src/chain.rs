//! The fixed four-joint serial chain and its forward kinematics.
//!
//! A [`Manipulator`] owns an ordered list of [`Joint`]s and an equally long
//! list of [`Link`]s. Link `i` is rotated by joints `0..=i`, applied in chain
//! order, then scaled by its length and accumulated from the base position.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector3;

use crate::joint::{Axis, Joint};
use crate::limit::AngleLimit;
use crate::solver::{GradientDescentSolver, IkResult};

/// Number of joints (and links) in the compiled-in chain.
pub const JOINT_COUNT: usize = 4;

/// A rigid segment of fixed length along a fixed local direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Segment length (scene units, >= 0).
    pub length: f64,
    /// Direction of the segment before any joint rotation.
    pub local_direction: Vector3<f64>,
}

impl Link {
    #[must_use]
    pub const fn new(length: f64, local_direction: Vector3<f64>) -> Self {
        Self {
            length,
            local_direction,
        }
    }
}

/// Serial-link arm with a fixed base.
///
/// Not internally synchronized: every mutating operation takes `&mut self`,
/// so concurrent use must be serialized by the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Manipulator {
    base: Vector3<f64>,
    joints: Vec<Joint>,
    links: Vec<Link>,
}

impl Manipulator {
    /// Build the fixed chain at `base`, all joints at angle 0.
    #[must_use]
    pub fn new(base: Vector3<f64>) -> Self {
        let mut arm = Self {
            base,
            joints: Vec::with_capacity(JOINT_COUNT),
            links: Vec::with_capacity(JOINT_COUNT),
        };
        arm.configure();
        arm
    }

    /// Reset joints and links to the fixed chain.
    ///
    /// | joint | axis | limit (rad)   | link length |
    /// |-------|------|---------------|-------------|
    /// | 0     | Z    | [-π, π]       | 2.0         |
    /// | 1     | Y    | [-π/2, π/2]   | 3.0         |
    /// | 2     | X    | [0, 8]        | 2.5         |
    /// | 3     | Y    | [-π, π]       | 1.0         |
    ///
    /// Every link points along +Y before rotation.
    pub fn configure(&mut self) {
        // Joint 2 intentionally spans more than a full turn.
        let layout = [
            (Axis::Z, AngleLimit::new(-PI, PI), 2.0),
            (Axis::Y, AngleLimit::new(-FRAC_PI_2, FRAC_PI_2), 3.0),
            (Axis::X, AngleLimit::new(0.0, 8.0), 2.5),
            (Axis::Y, AngleLimit::new(-PI, PI), 1.0),
        ];

        self.joints.clear();
        self.links.clear();
        for (axis, limit, length) in layout {
            self.joints.push(Joint::new(axis, limit));
            self.links.push(Link::new(length, Vector3::y()));
        }
    }

    /// Base position in world coordinates.
    #[must_use]
    pub const fn base_position(&self) -> Vector3<f64> {
        self.base
    }

    /// Number of joints.
    #[must_use]
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Sum of link lengths.
    #[must_use]
    pub fn max_reach(&self) -> f64 {
        self.links.iter().map(|link| link.length).sum()
    }

    /// Assign `values[i]` to joint `i` for the leading `min(len, dof)` joints.
    ///
    /// Short input leaves trailing joints untouched; extra values are ignored.
    pub fn set_angles(&mut self, values: &[f64]) {
        for (joint, &value) in self.joints.iter_mut().zip(values) {
            joint.set_angle(value);
        }
    }

    /// Current (clamped) angle of every joint, in chain order.
    #[must_use]
    pub fn angles(&self) -> Vec<f64> {
        self.joints.iter().map(Joint::angle).collect()
    }

    /// End-effector world position.
    #[must_use]
    pub fn forward_kinematics(&self) -> Vector3<f64> {
        self.link_offsets().fold(self.base, |position, offset| position + offset)
    }

    /// Base position followed by the far end of every link.
    ///
    /// Always `dof() + 1` long; the last element equals
    /// [`forward_kinematics`](Self::forward_kinematics).
    #[must_use]
    pub fn joint_world_positions(&self) -> Vec<Vector3<f64>> {
        let mut positions = Vec::with_capacity(self.links.len() + 1);
        let mut position = self.base;
        positions.push(position);
        for offset in self.link_offsets() {
            position = position + offset;
            positions.push(position);
        }
        positions
    }

    /// Solve IK toward `target` with the default solver parameters.
    ///
    /// The arm keeps the last iterate on failure.
    pub fn solve_ik(&mut self, target: &Vector3<f64>) -> IkResult {
        GradientDescentSolver::with_defaults().solve(self, target)
    }

    /// World-frame offset contributed by each link, in chain order.
    ///
    /// The rotation chain is re-applied from joint 0 for every link rather
    /// than composed incrementally; IK iteration counts depend on the exact
    /// rounding this produces.
    fn link_offsets(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.links.iter().enumerate().map(|(i, link)| {
            let direction = self.joints[..=i]
                .iter()
                .fold(link.local_direction, |direction, joint| joint.rotate(direction));
            direction * link.length
        })
    }
}

impl Default for Manipulator {
    /// The fixed chain based at the origin.
    fn default() -> Self {
        Self::new(Vector3::zeros())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
