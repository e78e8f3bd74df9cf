//! On-screen presentation of rendered figures.

use minifb::{Key, Window, WindowOptions};

use crate::{error::VisualError, interrupt::Interrupt};

/// A window presenting RGB pixel buffers as they are rendered.
///
/// Closing the window or pressing Escape dismisses it;
/// an animation keeps rendering (and capturing) after that,
/// it just stops being shown.
pub struct Preview {
    window: Window,
    buffer: Vec<u32>,
}

impl Preview {
    /// Open a window of the given pixel size.
    pub fn open(title: &str, (width, height): (u32, u32)) -> Result<Self, VisualError> {
        let mut window = Window::new(
            title,
            width as usize,
            height as usize,
            WindowOptions::default(),
        )?;
        // paces presentation, and keeps input responsive between frames
        window.set_target_fps(60);
        Ok(Self {
            window,
            buffer: Vec::new(),
        })
    }

    /// Present an RGB pixel buffer.
    ///
    /// Returns `false` once the window has been dismissed;
    /// the caller should stop presenting to it then.
    pub fn present(
        &mut self,
        rgb: &[u8],
        (width, height): (u32, u32),
    ) -> Result<bool, VisualError> {
        if !self.is_up() {
            return Ok(false);
        }
        self.buffer.clear();
        self.buffer.extend(rgb.chunks_exact(3).map(|p| {
            (255u32 << 24) | ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32
        }));
        self.window
            .update_with_buffer(&self.buffer, width as usize, height as usize)?;
        Ok(self.is_up())
    }

    /// Keep presenting a static figure until the window is dismissed
    /// or the session is interrupted.
    pub fn hold(
        &mut self,
        rgb: &[u8],
        size: (u32, u32),
        interrupt: &Interrupt,
    ) -> Result<(), VisualError> {
        while self.present(rgb, size)? {
            if interrupt.is_raised() {
                break;
            }
        }
        Ok(())
    }

    fn is_up(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }
}
