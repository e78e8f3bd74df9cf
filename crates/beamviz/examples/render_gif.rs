//! Render a run's 3D trajectory animation straight to a GIF,
//! without opening a preview window.
//!
//! Usage: `cargo run --example render_gif -- <sim_dir>`

use std::time::Duration;

use beamviz as bz;
use beamviz::visuals as bv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sim_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "testing".to_string());
    let cfg = bz::RunConfig::load(sim_dir)?;

    let mut animator = bv::Animator::new(
        &cfg,
        bv::AnimationParams {
            capture_gif: true,
            preview: false,
            // no window to pace for, keep the pause at the minimum
            frame_pause: Duration::from_millis(1),
            ..Default::default()
        },
        bv::Interrupt::install()?,
    )?;
    animator.animate_3d()?;

    println!("wrote {}", cfg.sim_dir().join("beam.gif").display());
    Ok(())
}
