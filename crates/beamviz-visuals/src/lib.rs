//! Figure rendering and animation for `beamviz`.
//!
//! Frames loaded through `beamviz-core` are rendered into RGB pixel
//! buffers, presented in a preview window, and optionally captured
//! and composited into a looping GIF.
//! Everything is strictly sequential; the only shared state is the
//! session interrupt flag the render loops poll.
//!
//! The usual entry point is an [`Animator`] built from a
//! [`RunConfig`][beamviz_core::RunConfig];
//! see the `beamviz` crate for the command-line wrapper.

#![warn(missing_docs)]

mod animate;
#[doc(inline)]
pub use animate::{AnimationParams, Animator};

mod capture;
#[doc(inline)]
pub use capture::{assemble_gif, save_png, ScratchDir, GIF_FPS};

mod error;
#[doc(inline)]
pub use error::VisualError;

mod interrupt;
#[doc(inline)]
pub use interrupt::Interrupt;

mod preview;
#[doc(inline)]
pub use preview::Preview;

mod scene;
#[doc(inline)]
pub use scene::{axis_bounds, draw_beam_frame, draw_triad, BeamChart, SceneParams};

mod series;
#[doc(inline)]
pub use series::{
    draw_displacement_profile, draw_transient, transient_series, Axis, ScalarChannel, SweepParams,
    TransientParams,
};
