//! Run configuration derived from the first frame of a simulation run.

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::{error::Error, frame::Frame};

/// Upper bound on the number of nodes drawn per frame.
/// Larger discretizations are subsampled with an even stride.
pub const MAX_SAMPLED_NODES: usize = 1000;
/// Upper bound on the number of orientation triads drawn per frame
/// (one more can appear when the stride floors unevenly).
pub const MAX_TRIADS: usize = 6;

/// Immutable configuration of one simulation run,
/// derived from frame 0 of its output directory.
///
/// All paths are owned here and threaded through every operation;
/// nothing depends on the process working directory.
#[derive(Clone, Debug)]
pub struct RunConfig {
    sim_dir: PathBuf,
    output_dir: PathBuf,
    /// Number of nodes in the discretization.
    pub node_count: usize,
    /// Total number of simulation steps in the run.
    pub step_count: usize,
    /// Only every `write_interval`-th step index has a frame on disk.
    pub write_interval: usize,
    /// Reference span `L0`: the last node's reference x-coordinate
    /// minus the first node's. Axis limits and triad lengths scale with this.
    pub span: f64,
    /// Strictly increasing node indices to draw,
    /// at most [`MAX_SAMPLED_NODES`] of them.
    pub node_samples: Vec<usize>,
    /// Stride between nodes that get an orientation triad drawn.
    pub triad_stride: usize,
}

impl RunConfig {
    /// Read frame 0 of `sim_dir/output` and derive the run configuration.
    ///
    /// Fails with [`Error::MissingFrame`] if frame 0 does not exist
    /// and [`Error::MalformedInput`] if it is internally inconsistent
    /// (body row count differing from the declared node count,
    /// zero node count or write interval).
    pub fn load(sim_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let sim_dir = sim_dir.into();
        let output_dir = sim_dir.join("output");

        let first = Frame::load(&output_dir.join("0.csv"))?;
        let header = first.header;
        if header.node_count == 0 {
            return Err(Error::MalformedInput(
                "frame 0 declares zero nodes".to_string(),
            ));
        }
        if header.write_interval == 0 {
            // the sampling strides divide by this
            return Err(Error::MalformedInput(
                "frame 0 declares a zero write interval".to_string(),
            ));
        }
        if first.nodes.len() != header.node_count {
            return Err(Error::MalformedInput(format!(
                "frame 0 has {} node records, header declares {}",
                first.nodes.len(),
                header.node_count
            )));
        }

        let span = first.nodes[first.nodes.len() - 1].ref_position.x
            - first.nodes[0].ref_position.x;

        let node_stride = header.node_count.div_ceil(MAX_SAMPLED_NODES);
        let node_samples = (0..header.node_count).step_by(node_stride).collect_vec();
        let triad_stride = (header.node_count / MAX_TRIADS).max(1);

        Ok(Self {
            sim_dir,
            output_dir,
            node_count: header.node_count,
            step_count: header.step_count,
            write_interval: header.write_interval,
            span,
            node_samples,
            triad_stride,
        })
    }

    /// The simulation directory this configuration was loaded from.
    #[inline]
    pub fn sim_dir(&self) -> &Path {
        &self.sim_dir
    }

    /// Path of the frame file for step index `n`.
    #[inline]
    pub fn frame_path(&self, n: usize) -> PathBuf {
        self.output_dir.join(format!("{n}.csv"))
    }

    /// Load the frame for step index `n`,
    /// checking its body row count against the configured node count.
    pub fn load_frame(&self, n: usize) -> Result<Frame, Error> {
        let frame = Frame::load(&self.frame_path(n))?;
        if frame.nodes.len() != self.node_count {
            return Err(Error::MalformedInput(format!(
                "frame {n} has {} node records, expected {}",
                frame.nodes.len(),
                self.node_count
            )));
        }
        Ok(frame)
    }

    /// Step indices that were persisted and should be visualized,
    /// in increasing order: `0, write_interval, 2 * write_interval, …`.
    pub fn sampled_steps(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.step_count).step_by(self.write_interval)
    }

    /// Node indices that get an orientation triad drawn, in increasing order.
    pub fn triad_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.node_count).step_by(self.triad_stride)
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use itertools::Itertools;

    /// Write `sim_dir/output/{n}.csv` with the given node and header counts.
    /// Reference x-coordinates are `0.5 * i`.
    fn write_frame(sim_dir: &Path, n: usize, rows: usize, header_nodes: usize) {
        let output_dir = sim_dir.join("output");
        std::fs::create_dir_all(&output_dir).expect("failed to create output dir");
        let mut text = String::from("N,n_steps,n_write,t,dt\n");
        text.push_str(&format!("{header_nodes},120,10,{},0.001\n\n\n", n as f64 * 0.001));
        for i in 0..rows {
            text.push_str(&format!(
                "{},0,0,0,0,0,1,0,0,0,1,0,0,0,1,0,0,0,0,0,0\n",
                i as f64 * 0.5
            ));
        }
        std::fs::write(output_dir.join(format!("{n}.csv")), text)
            .expect("failed to write frame fixture");
    }

    fn config_for(rows: usize) -> RunConfig {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_frame(dir.path(), 0, rows, rows);
        RunConfig::load(dir.path()).expect("failed to load run config")
    }

    #[test]
    fn derives_span_and_counts() {
        let cfg = config_for(21);
        assert_eq!(cfg.node_count, 21);
        assert_eq!(cfg.step_count, 120);
        assert_eq!(cfg.write_interval, 10);
        assert_relative_eq!(cfg.span, 10.0);
    }

    #[test]
    fn small_runs_sample_every_node() {
        let cfg = config_for(5);
        assert_eq!(cfg.node_samples, vec![0, 1, 2, 3, 4]);

        let cfg = config_for(1000);
        assert_eq!(cfg.node_samples.len(), 1000);
        assert_eq!(cfg.node_samples, (0..1000).collect_vec());
    }

    #[test]
    fn large_runs_sample_with_even_stride() {
        let cfg = config_for(2500);
        assert!(
            cfg.node_samples.len() <= MAX_SAMPLED_NODES,
            "sample set has {} indices",
            cfg.node_samples.len()
        );
        assert!(cfg.node_samples.iter().tuple_windows().all(|(a, b)| a < b));
        assert_eq!(cfg.node_samples[0], 0);
    }

    #[test]
    fn triad_stride_caps_triad_count() {
        let cfg = config_for(1000);
        assert_eq!(cfg.triad_stride, 166);
        // flooring makes this one more than MAX_TRIADS
        assert_eq!(cfg.triad_nodes().count(), 7);

        let cfg = config_for(5);
        assert_eq!(cfg.triad_stride, 1);
        assert_eq!(cfg.triad_nodes().count(), 5);

        let cfg = config_for(12);
        assert_eq!(cfg.triad_nodes().count(), MAX_TRIADS);
    }

    #[test]
    fn sampled_steps_follow_write_interval() {
        let cfg = config_for(3);
        let steps = cfg.sampled_steps().collect_vec();
        assert_eq!(steps.len(), 12);
        assert_eq!(steps[0], 0);
        assert_eq!(steps[11], 110);
        assert_eq!(steps, (0..120).step_by(10).collect_vec());
    }

    #[test]
    fn missing_first_frame_fails_construction() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("output")).expect("failed to create output dir");
        let err = RunConfig::load(dir.path()).unwrap_err();
        assert!(
            matches!(err, Error::MissingFrame(_)),
            "expected MissingFrame, got {err:?}"
        );
    }

    #[test]
    fn inconsistent_first_frame_fails_construction() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        // header declares 4 nodes, body has 3
        write_frame(dir.path(), 0, 3, 4);
        let err = RunConfig::load(dir.path()).unwrap_err();
        assert!(
            matches!(err, Error::MalformedInput(_)),
            "expected MalformedInput, got {err:?}"
        );
    }

    #[test]
    fn frame_with_wrong_row_count_is_malformed() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        write_frame(dir.path(), 0, 3, 3);
        write_frame(dir.path(), 10, 2, 3);

        let cfg = RunConfig::load(dir.path()).expect("failed to load run config");
        assert!(cfg.load_frame(10).is_err());
        let err = cfg.load_frame(10).unwrap_err();
        assert!(
            matches!(err, Error::MalformedInput(_)),
            "expected MalformedInput, got {err:?}"
        );
    }
}
