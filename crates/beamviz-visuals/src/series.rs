//! 2D figures: scalar time-series and per-node displacement profiles.

use plotters::prelude::*;

use beamviz_core::{Error as FrameError, Frame, NodeRecord, RunConfig, Vec3};

use crate::{error::VisualError, scene::render_err};

/// A component axis of a vector quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The x component.
    X,
    /// The y component.
    Y,
    /// The z component.
    Z,
}

impl Axis {
    #[inline]
    fn component(self, v: &Vec3) -> f64 {
        v[self as usize]
    }

    /// 1-based component index, as used in quantity labels (`u3` etc.).
    #[inline]
    fn label_index(self) -> usize {
        self as usize + 1
    }
}

/// Which vector block of a node record a scalar time-series samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarChannel {
    /// Displacement from the reference position.
    Displacement,
    /// Translational velocity.
    Velocity,
    /// Angular velocity.
    AngularVelocity,
}

impl ScalarChannel {
    fn sample(self, node: &NodeRecord, axis: Axis) -> f64 {
        match self {
            Self::Displacement => axis.component(&node.displacement),
            Self::Velocity => axis.component(&node.velocity),
            Self::AngularVelocity => axis.component(&node.angular_velocity),
        }
    }
}

/// Parameters for the end-node transient figure.
///
/// The quantity plotted is a choice, not a property of the data;
/// the defaults follow the solver's usual point of interest
/// (vertical velocity of the free end of the beam).
#[derive(Clone, Debug)]
pub struct TransientParams {
    /// Vector block the scalar is sampled from. Default: velocity.
    pub channel: ScalarChannel,
    /// Component of the sampled block. Default: z.
    pub axis: Axis,
    /// Index of the probed node; `None` means the last node. Default: `None`.
    pub node: Option<usize>,
    /// Fixed time window of the plot. Default: `0..5`.
    pub time_range: std::ops::Range<f64>,
    /// Fixed value window of the plot. Default: `-5..10`.
    pub value_range: std::ops::Range<f64>,
    /// Resolution of the rendered figure in pixels. Default: 960 × 720.
    pub size: (u32, u32),
}

impl Default for TransientParams {
    fn default() -> Self {
        Self {
            channel: ScalarChannel::Velocity,
            axis: Axis::Z,
            node: None,
            time_range: 0.0..5.0,
            value_range: -5.0..10.0,
            size: (960, 720),
        }
    }
}

/// Collect the probed scalar of every sampled frame as `(time, value)` pairs,
/// in frame order.
pub fn transient_series(
    cfg: &RunConfig,
    params: &TransientParams,
) -> Result<Vec<(f64, f64)>, VisualError> {
    let node_idx = params.node.unwrap_or(cfg.node_count - 1);
    if node_idx >= cfg.node_count {
        return Err(FrameError::MalformedInput(format!(
            "probe node {node_idx} out of range for {} nodes",
            cfg.node_count
        ))
        .into());
    }

    let mut series = Vec::new();
    for n in cfg.sampled_steps() {
        let frame = cfg.load_frame(n)?;
        let value = params.channel.sample(&frame.nodes[node_idx], params.axis);
        series.push((frame.header.time, value));
    }
    Ok(series)
}

/// Render a collected transient series into an RGB pixel buffer.
pub fn draw_transient(
    buffer: &mut [u8],
    series: &[(f64, f64)],
    params: &TransientParams,
) -> Result<(), VisualError> {
    let root = BitMapBackend::with_buffer(buffer, params.size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(params.time_range.clone(), params.value_range.clone())
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("t")
        .draw()
        .map_err(render_err)?;
    chart
        .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Parameters for the per-node displacement sweep animation.
#[derive(Clone, Debug)]
pub struct SweepParams {
    /// Displacement component plotted across the beam. Default: z.
    pub axis: Axis,
    /// Half-height of the fixed symmetric value window,
    /// as a fraction of the reference span. Default: 0.2.
    pub range_fraction: f64,
    /// Resolution of the rendered figure in pixels. Default: 960 × 720.
    pub size: (u32, u32),
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            axis: Axis::Z,
            range_fraction: 0.2,
            size: (960, 720),
        }
    }
}

/// Render one frame's displacement profile
/// (one component across all nodes, against node index)
/// into an RGB pixel buffer.
pub fn draw_displacement_profile(
    buffer: &mut [u8],
    frame: &Frame,
    cfg: &RunConfig,
    params: &SweepParams,
) -> Result<(), VisualError> {
    let root = BitMapBackend::with_buffer(buffer, params.size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let half_range = cfg.span * params.range_fraction;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..cfg.node_count as f64, -half_range..half_range)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("i")
        .y_desc(format!("u{}", params.axis.label_index()))
        .draw()
        .map_err(render_err)?;
    chart
        .draw_series(LineSeries::new(
            frame
                .nodes
                .iter()
                .enumerate()
                .map(|(i, node)| (i as f64, params.axis.component(&node.displacement))),
            &BLUE,
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

//
// tests
//
