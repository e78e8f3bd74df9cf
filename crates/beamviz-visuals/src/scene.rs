//! The 3D scene: the deformed beam path and node orientation triads.

use itertools::Itertools;
use plotters::coord::{ranged3d::Cartesian3d, types::RangedCoordf64};
use plotters::prelude::*;

use beamviz_core::{Frame, Mat3, RunConfig, Vec3};

use crate::error::VisualError;

/// A 3D chart with the fixed f64 coordinate system used for beam scenes.
pub type BeamChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>>;

/// Parameters to configure the 3D beam scene.
#[derive(Clone, Debug)]
pub struct SceneParams {
    /// Resolution of the rendered scene in pixels. Default: 960 × 720.
    pub size: (u32, u32),
    /// Extra multiplier applied on top of the span-derived triad arrow length.
    /// Default: 1.0.
    pub triad_scale: f64,
    /// Radius of the node markers in pixels. Default: 2.
    pub marker_size: i32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            size: (960, 720),
            triad_scale: 1.0,
            marker_size: 2,
        }
    }
}

/// Axis limits of the 3D view for a run with reference span `span`:
/// the x range and the (shared) y/z range.
///
/// Fixed for the whole animation so the view does not rescale
/// frame to frame: x covers the span plus a hair of headroom,
/// y and z are centered on zero with the same total extent.
pub fn axis_bounds(span: f64) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let len = 1.01 * span;
    (0.0..len, -len / 2.0..len / 2.0)
}

/// Render one frame of the 3D beam scene into an RGB pixel buffer.
///
/// Draws the line-and-marker path through the sampled node subset
/// and an orientation triad at every triad-stride-th node,
/// with the frame's step index, time, and timestep in the title.
pub fn draw_beam_frame(
    buffer: &mut [u8],
    step: usize,
    frame: &Frame,
    cfg: &RunConfig,
    params: &SceneParams,
) -> Result<(), VisualError> {
    let root = BitMapBackend::with_buffer(buffer, params.size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let (x_range, yz_range) = axis_bounds(cfg.span);
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(
            format!(
                "n={step}, t={}, dt={}",
                frame.header.time, frame.header.dt
            ),
            ("sans-serif", 24),
        )
        .build_cartesian_3d(x_range, yz_range.clone(), yz_range)
        .map_err(render_err)?;
    chart.configure_axes().draw().map_err(render_err)?;

    let path = cfg
        .node_samples
        .iter()
        .map(|&i| {
            let p = frame.nodes[i].position();
            (p.x, p.y, p.z)
        })
        .collect_vec();
    chart
        .draw_series(LineSeries::new(path.iter().copied(), &BLACK))
        .map_err(render_err)?;
    chart
        .draw_series(
            path.iter()
                .map(|&p| Circle::new(p, params.marker_size, BLACK.filled())),
        )
        .map_err(render_err)?;

    let arrow_scale = cfg.span / 10.0 * params.triad_scale;
    for i in cfg.triad_nodes() {
        let node = &frame.nodes[i];
        draw_triad(&mut chart, node.position(), &node.triad, arrow_scale)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Draw a node's local orientation frame as three directed segments
/// from `anchor` along the triad's column vectors,
/// colored red/green/blue for the local x/y/z axes.
///
/// Scaling happens on a copy; the caller's matrix is never modified.
pub fn draw_triad(
    chart: &mut BeamChart<'_, '_>,
    anchor: Vec3,
    triad: &Mat3,
    scale: f64,
) -> Result<(), VisualError> {
    let scaled = triad * scale;
    for (axis, color) in [RED, GREEN, BLUE].iter().enumerate() {
        let tip = anchor + scaled.column(axis);
        chart
            .draw_series(LineSeries::new(
                [(anchor.x, anchor.y, anchor.z), (tip.x, tip.y, tip.z)],
                color,
            ))
            .map_err(render_err)?;
    }
    Ok(())
}

pub(crate) fn render_err(e: impl std::fmt::Display) -> VisualError {
    VisualError::Render(e.to_string())
}

//
// tests
//
