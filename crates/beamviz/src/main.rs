//! Command-line entry point: load a run and present its figures in sequence.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use beamviz::visuals::{
    AnimationParams, Animator, Interrupt, SweepParams, TransientParams,
};
use beamviz::RunConfig;

/// Render figures from a beam dynamics simulation output directory.
#[derive(Parser, Debug)]
#[command(name = "beamviz", version, about)]
struct Cli {
    /// Simulation directory containing the `output` subdirectory of frame files.
    sim_dir: PathBuf,
    /// Capture the 3D animation frames and composite them into `beam.gif`.
    #[arg(long)]
    gif: bool,
    /// Render without opening preview windows.
    /// All on-disk artifacts are still produced.
    #[arg(long)]
    headless: bool,
    /// Also play the per-node vertical displacement sweep.
    #[arg(long)]
    sweep: bool,
    /// Extra scale multiplier for the orientation triads.
    #[arg(long, default_value_t = 1.0)]
    triad_scale: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let interrupt = Interrupt::install().context("failed to install the interrupt handler")?;
    let cfg = RunConfig::load(&cli.sim_dir).with_context(|| {
        format!(
            "failed to load run configuration from {}",
            cli.sim_dir.display()
        )
    })?;
    tracing::info!(
        nodes = cfg.node_count,
        steps = cfg.step_count,
        write_interval = cfg.write_interval,
        span = cfg.span,
        "run configuration loaded"
    );

    let params = AnimationParams {
        capture_gif: cli.gif,
        preview: !cli.headless,
        triad_scale: cli.triad_scale,
        ..AnimationParams::default()
    };
    let mut animator = Animator::new(&cfg, params, interrupt.clone())
        .context("failed to set up the animation session")?;

    animator
        .plot_transient(&TransientParams::default())
        .context("end node transient figure failed")?;
    if cli.sweep && !interrupt.is_raised() {
        animator
            .animate_displacement_sweep(&SweepParams::default())
            .context("displacement sweep failed")?;
    }
    if !interrupt.is_raised() {
        animator.animate_3d().context("3d animation failed")?;
    }
    Ok(())
}
