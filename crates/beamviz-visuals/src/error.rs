//! Errors in rendering and presenting figures.

/// Error in rendering, capturing, or presenting a figure.
#[derive(thiserror::Error, Debug)]
pub enum VisualError {
    /// Error loading frame data.
    #[error("loading frame data failed")]
    Frame(#[from] beamviz_core::Error),
    /// Error from the chart backend.
    ///
    /// (Implementation note: backend error converted to string
    /// to avoid carrying the backend's generic error type around)
    #[error("drawing a chart failed: {0}")]
    Render(String),
    /// Error encoding or decoding a captured frame image.
    #[error("frame image encoding failed")]
    Image(#[from] image::ImageError),
    /// Error from the preview window.
    #[error("preview window failed")]
    Window(#[from] minifb::Error),
    /// Error reading a file or manipulating the scratch directory.
    #[error("filesystem error")]
    Filesystem(#[from] std::io::Error),
}
