//! Human-readable snapshot of a [`Manipulator`].
//!
//! [`ArmReport`] is built only from the arm's public read-only accessors and
//! carries no behavior of its own beyond formatting.

use std::fmt;
use std::io;

use nalgebra::Vector3;

use crate::chain::Manipulator;

/// Point-in-time view of an arm for debugging output.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmReport {
    pub base: Vector3<f64>,
    /// Joint angles in radians.
    pub angles: Vec<f64>,
    pub link_lengths: Vec<f64>,
    /// Base followed by the far end of every link.
    pub positions: Vec<Vector3<f64>>,
    pub end_effector: Vector3<f64>,
    /// Sum of link lengths.
    pub max_reach: f64,
}

impl ArmReport {
    /// Snapshot `arm`.
    #[must_use]
    pub fn capture(arm: &Manipulator) -> Self {
        Self {
            base: arm.base_position(),
            angles: arm.angles(),
            link_lengths: arm.links().iter().map(|link| link.length).collect(),
            positions: arm.joint_world_positions(),
            end_effector: arm.forward_kinematics(),
            max_reach: arm.max_reach(),
        }
    }

    /// Write the report text to `out`.
    ///
    /// # Errors
    ///
    /// Any I/O error from writing or flushing `out`.
    pub fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }
}

struct Point<'a>(&'a Vector3<f64>);

impl fmt::Display for Point<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl fmt::Display for ArmReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ARM DEBUG INFO ===")?;
        writeln!(f, "Base position: {}", Point(&self.base))?;

        writeln!(f, "Joint angles (radians):")?;
        for (i, angle) in self.angles.iter().enumerate() {
            writeln!(f, "  Joint {i}: {angle} rad ({} deg)", angle.to_degrees())?;
        }

        writeln!(f, "Link lengths:")?;
        for (i, length) in self.link_lengths.iter().enumerate() {
            writeln!(f, "  Link {i}: {length}")?;
        }

        writeln!(f, "Joint positions:")?;
        for (i, position) in self.positions.iter().enumerate() {
            writeln!(f, "  Position {i}: {}", Point(position))?;
        }

        writeln!(f, "End effector: {}", Point(&self.end_effector))?;
        writeln!(f, "Maximum reach: {}", self.max_reach)?;
        writeln!(f, "===================")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
