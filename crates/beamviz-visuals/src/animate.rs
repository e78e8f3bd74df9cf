//! Sequential animation driving: load a frame, render it, present it,
//! optionally capture it, repeat.

use std::time::Duration;

use beamviz_core::RunConfig;

use crate::{
    capture::{assemble_gif, save_png, ScratchDir},
    error::VisualError,
    interrupt::Interrupt,
    preview::Preview,
    scene::{draw_beam_frame, SceneParams},
    series::{draw_displacement_profile, draw_transient, transient_series, SweepParams, TransientParams},
};

/// Parameters to control animation playback and capture.
#[derive(Clone, Debug)]
pub struct AnimationParams {
    /// Whether 3D frames are captured to a scratch directory
    /// and composited into a GIF after the animation. Default: false.
    pub capture_gif: bool,
    /// Whether figures are presented in a preview window. Default: true.
    ///
    /// Disabling this still renders every frame and produces
    /// the same on-disk artifacts.
    pub preview: bool,
    /// Resolution of rendered figures in pixels. Default: 960 × 720.
    pub size: (u32, u32),
    /// Extra multiplier applied to triad arrow length. Default: 1.0.
    pub triad_scale: f64,
    /// Pause between animation frames.
    /// Must be nonzero so playback is observable as motion,
    /// but carries no other meaning. Default: 10 ms.
    pub frame_pause: Duration,
    /// File name of the assembled GIF, within the simulation directory.
    /// Default: `beam.gif`.
    pub gif_name: String,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            capture_gif: false,
            preview: true,
            size: (960, 720),
            triad_scale: 1.0,
            frame_pause: Duration::from_millis(10),
            gif_name: "beam.gif".to_string(),
        }
    }
}

/// Drives the figures of one simulation run, strictly sequentially:
/// frame `n + 1` is never loaded before frame `n` is fully rendered.
pub struct Animator<'a> {
    cfg: &'a RunConfig,
    params: AnimationParams,
    interrupt: Interrupt,
    // created up front when capture is requested;
    // the guard removes it again if the animation never finishes
    scratch: Option<ScratchDir>,
}

impl<'a> Animator<'a> {
    /// Create an animator for a run.
    ///
    /// When GIF capture is requested this also creates the scratch
    /// directory the captured frames go to, so a capture session fails
    /// up front rather than mid-animation if the directory can't exist.
    pub fn new(
        cfg: &'a RunConfig,
        params: AnimationParams,
        interrupt: Interrupt,
    ) -> Result<Self, VisualError> {
        let scratch = if params.capture_gif {
            Some(ScratchDir::create(cfg.sim_dir())?)
        } else {
            None
        };
        Ok(Self {
            cfg,
            params,
            interrupt,
            scratch,
        })
    }

    /// Play the 3D trajectory animation over all sampled frames,
    /// capturing them into a GIF when enabled.
    ///
    /// An interrupt stops the playback loop cleanly;
    /// a partially captured scratch directory is removed on the way out.
    pub fn animate_3d(&mut self) -> Result<(), VisualError> {
        let scratch = self.scratch.take();
        let mut preview = self.open_preview("beamviz: 3d trajectory", self.params.size)?;
        let mut buffer = self.frame_buffer();
        let scene = SceneParams {
            size: self.params.size,
            triad_scale: self.params.triad_scale,
            ..SceneParams::default()
        };

        for n in self.cfg.sampled_steps() {
            if self.interrupt.is_raised() {
                tracing::info!(step = n, "interrupted, winding down");
                return Ok(());
            }
            let frame = self.cfg.load_frame(n)?;
            draw_beam_frame(&mut buffer, n, &frame, self.cfg, &scene)?;
            tracing::debug!(step = n, time = frame.header.time, "rendered frame");

            if let Some(scratch) = &scratch {
                save_png(&buffer, self.params.size, &scratch.frame_path(n))?;
            }
            if let Some(p) = preview.as_mut() {
                if !p.present(&buffer, self.params.size)? {
                    preview = None;
                }
            }
            std::thread::sleep(self.params.frame_pause);
        }

        if let Some(scratch) = scratch {
            let out_path = self.cfg.sim_dir().join(&self.params.gif_name);
            assemble_gif(scratch, self.cfg, &out_path)?;
        }
        Ok(())
    }

    /// Play the per-node displacement sweep over all sampled frames.
    pub fn animate_displacement_sweep(&mut self, sweep: &SweepParams) -> Result<(), VisualError> {
        let mut preview = self.open_preview("beamviz: displacement sweep", sweep.size)?;
        let size = sweep.size;
        let mut buffer = vec![0u8; (size.0 * size.1 * 3) as usize];

        for n in self.cfg.sampled_steps() {
            if self.interrupt.is_raised() {
                tracing::info!(step = n, "interrupted, winding down");
                return Ok(());
            }
            let frame = self.cfg.load_frame(n)?;
            draw_displacement_profile(&mut buffer, &frame, self.cfg, sweep)?;

            if let Some(p) = preview.as_mut() {
                if !p.present(&buffer, size)? {
                    preview = None;
                }
            }
            std::thread::sleep(self.params.frame_pause);
        }
        Ok(())
    }

    /// Extract and render the end-node transient figure,
    /// save it as `transient.png` in the simulation directory,
    /// and keep it up in the preview window until dismissed.
    pub fn plot_transient(&mut self, params: &TransientParams) -> Result<(), VisualError> {
        let series = transient_series(self.cfg, params)?;
        let mut buffer = vec![0u8; (params.size.0 * params.size.1 * 3) as usize];
        draw_transient(&mut buffer, &series, params)?;

        save_png(
            &buffer,
            params.size,
            &self.cfg.sim_dir().join("transient.png"),
        )?;
        if let Some(mut p) = self.open_preview("beamviz: end node transient", params.size)? {
            p.hold(&buffer, params.size, &self.interrupt)?;
        }
        Ok(())
    }

    fn open_preview(&self, title: &str, size: (u32, u32)) -> Result<Option<Preview>, VisualError> {
        if !self.params.preview || self.interrupt.is_raised() {
            return Ok(None);
        }
        Preview::open(title, size).map(Some)
    }

    fn frame_buffer(&self) -> Vec<u8> {
        let (w, h) = self.params.size;
        vec![0; (w * h * 3) as usize]
    }
}
