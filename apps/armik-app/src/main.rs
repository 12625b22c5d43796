//! armik manipulator CLI.
//!
//! Provides five modes of operation:
//! - `fk`: Apply joint angles and print every joint position
//! - `ik`: Solve for a target position and print the outcome
//! - `dump`: Print the full diagnostic report
//! - `stabilize`: Run a shaken-base stabilization session and print statistics
//! - `info`: Print crate versions and the fixed chain layout

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Vector3;
use tracing::info;

use armik_core::ArmikConfig;
use armik_ik::{ArmReport, GradientDescentSolver, Manipulator};
use armik_sim::StabilizationSession;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Four-joint manipulator kinematics.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file. Missing sections use defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply joint angles (radians) and print forward kinematics.
    Fk {
        /// Up to four joint angles; missing ones stay at 0.
        #[arg(num_args = 0..=4, allow_negative_numbers = true)]
        angles: Vec<f64>,
    },

    /// Solve inverse kinematics for a target position.
    Ik {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,

        /// Starting angles, comma separated.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        from: Vec<f64>,
    },

    /// Print the diagnostic report.
    Dump {
        /// Joint angles to apply first, comma separated.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        angles: Vec<f64>,
    },

    /// Shake the base and hold the end effector in place.
    Stabilize {
        /// Session length in seconds.
        #[arg(short, long)]
        duration: Option<f64>,

        /// Apply IK solutions directly instead of easing toward them.
        #[arg(long)]
        no_smooth: bool,
    },

    /// Print crate information.
    Info,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn fmt_point(p: &Vector3<f64>) -> String {
    format!("({:.4}, {:.4}, {:.4})", p.x, p.y, p.z)
}

fn build_arm(config: &ArmikConfig, angles: &[f64]) -> Manipulator {
    let mut arm = Manipulator::new(Vector3::from(config.session.base));
    arm.set_angles(angles);
    arm
}

fn run_fk(config: &ArmikConfig, angles: &[f64]) {
    let arm = build_arm(config, angles);
    for (i, p) in arm.joint_world_positions().iter().enumerate() {
        println!("position {i}: {}", fmt_point(p));
    }
    println!("end effector: {}", fmt_point(&arm.forward_kinematics()));
}

fn run_ik(config: &ArmikConfig, target: Vector3<f64>, from: &[f64]) {
    let mut arm = build_arm(config, from);
    let result = GradientDescentSolver::new(config.solver).solve(&mut arm, &target);

    println!(
        "{} after {} iterations, error {:.5}",
        if result.converged { "converged" } else { "did not converge" },
        result.iterations,
        result.position_error
    );
    for (i, angle) in arm.angles().iter().enumerate() {
        println!("  joint {i}: {angle:.5} rad ({:.2} deg)", angle.to_degrees());
    }
    println!("end effector: {}", fmt_point(&arm.forward_kinematics()));
}

fn run_dump(config: &ArmikConfig, angles: &[f64]) -> Result<()> {
    let arm = build_arm(config, angles);
    ArmReport::capture(&arm)
        .write_to(&mut std::io::stdout().lock())
        .context("failed to write report")
}

fn run_stabilize(mut config: ArmikConfig, duration: Option<f64>, no_smooth: bool) -> Result<()> {
    if let Some(duration) = duration {
        config.session.duration = duration;
    }
    if no_smooth {
        config.stabilizer.smooth = false;
    }
    config.validate().context("invalid stabilization settings")?;

    let mut session = StabilizationSession::new(&config);
    let stats = session.run();

    println!(
        "steps={}, converged={}, failed={}",
        stats.steps, stats.converged, stats.failed
    );
    if let Some(mean) = stats.mean_tracking_error() {
        println!(
            "tracking error: mean={mean:.4}, max={:.4}",
            stats.max_tracking_error
        );
    }
    Ok(())
}

fn run_info() {
    println!("armik v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  armik-core {}", env!("CARGO_PKG_VERSION"));
    println!("  armik-ik   {}", env!("CARGO_PKG_VERSION"));
    println!("  armik-sim  {}", env!("CARGO_PKG_VERSION"));
    println!("  armik-ffi  {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("chain:");
    let arm = Manipulator::default();
    for (i, (joint, link)) in arm.joints().iter().zip(arm.links()).enumerate() {
        let limit = joint.limit();
        println!(
            "  joint {i}: axis {}, limit [{:.4}, {:.4}], link {}",
            joint.axis().name(),
            limit.low(),
            limit.high(),
            link.length
        );
    }
    println!("  max reach: {}", arm.max_reach());
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("armik=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = ArmikConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            info!(path = %path.display(), "loaded config");
            config
        }
        None => ArmikConfig::default(),
    };

    match cli.command {
        Commands::Fk { angles } => run_fk(&config, &angles),
        Commands::Ik { x, y, z, from } => run_ik(&config, Vector3::new(x, y, z), &from),
        Commands::Dump { angles } => run_dump(&config, &angles)?,
        Commands::Stabilize {
            duration,
            no_smooth,
        } => run_stabilize(config, duration, no_smooth)?,
        Commands::Info => run_info(),
    }
    Ok(())
}
