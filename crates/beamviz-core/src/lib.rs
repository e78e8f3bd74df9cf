//! This is the core crate containing most of `beamviz`'s functionality
//! (specifically, everything except the visuals).
//! See the `beamviz` crate's documentation for an in-depth introduction.

#![warn(missing_docs)]

pub mod error;
#[doc(inline)]
pub use error::Error;

pub mod frame;
#[doc(inline)]
pub use frame::{Frame, FrameHeader, NodeRecord};

pub mod run;
#[doc(inline)]
pub use run::RunConfig;

// nalgebra re-exports of common types for convenience

pub use nalgebra as na;
/// Type alias for a 3D `nalgebra` vector.
pub type Vec3 = na::Vector3<f64>;
/// Type alias for a 3×3 `nalgebra` matrix.
///
/// Used for node orientation triads;
/// the matrix columns are the local x/y/z basis vectors.
pub type Mat3 = na::Matrix3<f64>;
