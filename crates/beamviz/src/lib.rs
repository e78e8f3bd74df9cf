//! `beamviz` renders visualizations of beam/rod dynamics simulation output:
//! a 3D animation of the deforming structure with node orientation triads,
//! 2D scalar time-series figures, and an optional looping GIF export.
//!
//! The input is a directory of per-timestep CSV frame files
//! written by the solver (see [`frame`] for the exact layout).
//! [`RunConfig::load`] derives the run configuration from frame 0;
//! the [`visuals`] module (behind the `visuals` feature, on by default)
//! drives rendering from there.
//!
//! This crate re-exports everything from `beamviz-core`,
//! so depending on it alone is enough for the data-loading side.

pub use beamviz_core::*;

/// Figure rendering and animation (the `beamviz-visuals` crate).
#[cfg(feature = "visuals")]
pub mod visuals {
    pub use beamviz_visuals::*;
}
