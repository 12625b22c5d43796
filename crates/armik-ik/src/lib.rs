//! Forward and inverse kinematics for a fixed four-joint serial arm.
//!
//! Provides angle-limited revolute joints, forward kinematics that
//! re-applies the rotation chain for every link, and a finite-difference
//! gradient-descent IK solver that drives the arm toward a target position.
//!
//! # Architecture
//!
//! ```text
//! AngleLimit ──► Joint ──┐
//!                        ├──► Manipulator ──► GradientDescentSolver ──► joint angles
//!                 Link ──┘          │
//!                                   └──► ArmReport (diagnostics)
//! ```
//!
//! The [`Manipulator`] is a plain mutable value. The solver evaluates every
//! candidate by applying it to the arm, so joint limits are honored
//! throughout and the arm is left at the last iterate.

pub mod chain;
pub mod diagnostics;
pub mod joint;
pub mod limit;
pub mod solver;

pub use chain::{Link, Manipulator, JOINT_COUNT};
pub use diagnostics::ArmReport;
pub use joint::{Axis, Joint};
pub use limit::AngleLimit;
pub use solver::{GradientDescentSolver, IkResult};

pub use armik_core::SolverConfig;
