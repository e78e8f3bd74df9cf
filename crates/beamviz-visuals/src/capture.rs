//! Capturing rendered frames to disk and compositing them into a GIF.

use std::{
    fs,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use beamviz_core::{Error as FrameError, RunConfig};

use crate::error::VisualError;

/// Playback rate of assembled GIFs in frames per second.
pub const GIF_FPS: u32 = 60;

/// A scratch directory holding captured frame images
/// while an animation renders.
///
/// Removed from disk on [`close`][Self::close];
/// dropping without closing (an early error exit, an interrupt)
/// also removes it on a best-effort basis,
/// so failed runs don't leave partial captures behind.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create the scratch directory under `parent`.
    pub fn create(parent: &Path) -> Result<Self, VisualError> {
        let path = parent.join("output_tmp");
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Location of the scratch directory.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the captured image for step index `n`.
    #[inline]
    pub fn frame_path(&self, n: usize) -> PathBuf {
        self.path.join(format!("{n}.png"))
    }

    /// Remove the scratch directory and everything in it.
    pub fn close(self) -> Result<(), VisualError> {
        let result = fs::remove_dir_all(&self.path);
        // already removed, don't remove again on drop
        std::mem::forget(self);
        result.map_err(VisualError::from)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Save an RGB pixel buffer of the given resolution as a PNG.
pub fn save_png(buffer: &[u8], (width, height): (u32, u32), path: &Path) -> Result<(), VisualError> {
    let img = image::RgbImage::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| VisualError::Render("pixel buffer does not match resolution".to_string()))?;
    img.save(path)?;
    Ok(())
}

/// Composite the captured frame images into a single looping GIF at `out_path`,
/// then remove the scratch directory.
///
/// Expects one image per sampled step of the run, in increasing step order;
/// a gap in the captures fails with *Missing-Frame* rather than skipping.
/// The scratch directory is removed even when assembly fails partway.
pub fn assemble_gif(
    scratch: ScratchDir,
    cfg: &RunConfig,
    out_path: &Path,
) -> Result<(), VisualError> {
    if cfg.sampled_steps().next().is_none() {
        return Err(FrameError::MalformedInput(
            "run has no sampled frames to composite".to_string(),
        )
        .into());
    }
    tracing::info!(path = %out_path.display(), "writing gif");

    let file = File::create(out_path)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(1000, GIF_FPS);

    let mut frames = 0usize;
    for n in cfg.sampled_steps() {
        let path = scratch.frame_path(n);
        if !path.exists() {
            return Err(FrameError::MissingFrame(path).into());
        }
        let img = image::open(&path)?.into_rgba8();
        encoder.encode_frame(Frame::from_parts(img, 0, 0, delay))?;
        frames += 1;
    }
    drop(encoder);

    tracing::info!(frames, "gif done");
    scratch.close()
}

//
// tests
//
