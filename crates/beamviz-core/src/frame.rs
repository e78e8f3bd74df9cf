//! Loading of per-timestep frame files written by the beam solver.
//!
//! One frame file holds the full state of the discretized beam
//! at a single timestep, as comma-separated values:
//! a line of textual column labels, a metadata record,
//! two reserved lines, and then one 21-column record per node.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{error::Error, Mat3, Vec3};

/// Line number (1-based) of the metadata record in a frame file.
const HEADER_LINE: u64 = 2;
/// First line of the node records. Lines between the metadata record
/// and this are reserved and skipped.
const BODY_START_LINE: u64 = 5;
/// Number of columns in a node record.
pub const NODE_COLUMNS: usize = 21;

/// Metadata describing the simulation run and the instant a frame was written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameHeader {
    /// Number of nodes in the discretization.
    pub node_count: usize,
    /// Total number of simulation steps in the run.
    pub step_count: usize,
    /// Write interval: only every `write_interval`-th step was persisted.
    pub write_interval: usize,
    /// Simulation time at this frame.
    pub time: f64,
    /// Timestep size of the run.
    pub dt: f64,
}

/// State of a single node at a single timestep.
///
/// The column blocks of a node record, in file order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeRecord {
    /// Position of the node in the undeformed reference configuration.
    pub ref_position: Vec3,
    /// Displacement from the reference position.
    pub displacement: Vec3,
    /// Local orientation triad. Matrix columns are the local x/y/z basis vectors;
    /// the file stores the nine values flattened row-major.
    pub triad: Mat3,
    /// Translational velocity.
    pub velocity: Vec3,
    /// Angular velocity.
    pub angular_velocity: Vec3,
}

impl NodeRecord {
    /// Absolute position of the node, i.e. reference position plus displacement.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.ref_position + self.displacement
    }
}

/// One discrete timestep's full data record, read from one indexed file.
#[derive(Clone, Debug)]
pub struct Frame {
    /// The frame's metadata record.
    pub header: FrameHeader,
    /// One record per node.
    pub nodes: Vec<NodeRecord>,
}

impl Frame {
    /// Load a frame from a file.
    ///
    /// Fails with [`Error::MissingFrame`] if the file does not exist
    /// and [`Error::MalformedInput`] if any record
    /// does not match the fixed schema.
    /// The row count is checked against the run configuration
    /// by [`RunConfig::load_frame`][crate::RunConfig::load_frame],
    /// not here, since a standalone frame carries no expected count.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::MissingFrame(PathBuf::from(path)),
            _ => Error::Filesystem(e),
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let mut header: Option<FrameHeader> = None;
        let mut nodes = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::MalformedInput(e.to_string()))?;
            // classify records by the physical line they start on,
            // so that blank reserved lines (which the reader drops)
            // can't shift the body
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if line == HEADER_LINE {
                header = Some(parse_header(&record)?);
            } else if line >= BODY_START_LINE {
                nodes.push(parse_node(&record, line)?);
            }
        }

        let header =
            header.ok_or_else(|| Error::MalformedInput("missing metadata record".to_string()))?;
        Ok(Self { header, nodes })
    }
}

fn parse_field(record: &csv::StringRecord, idx: usize, line: u64) -> Result<f64, Error> {
    let field = record.get(idx).ok_or_else(|| {
        Error::MalformedInput(format!(
            "line {line}: expected at least {} fields, got {}",
            idx + 1,
            record.len()
        ))
    })?;
    field.parse::<f64>().map_err(|_| {
        Error::MalformedInput(format!("line {line}: field {} is not a number: {field:?}", idx))
    })
}

fn parse_header(record: &csv::StringRecord) -> Result<FrameHeader, Error> {
    let field = |idx| parse_field(record, idx, HEADER_LINE);
    Ok(FrameHeader {
        node_count: field(0)? as usize,
        step_count: field(1)? as usize,
        write_interval: field(2)? as usize,
        time: field(3)?,
        dt: field(4)?,
    })
}

fn parse_node(record: &csv::StringRecord, line: u64) -> Result<NodeRecord, Error> {
    if record.len() != NODE_COLUMNS {
        return Err(Error::MalformedInput(format!(
            "line {line}: node record has {} columns, expected {NODE_COLUMNS}",
            record.len()
        )));
    }
    let mut values = [0.0; NODE_COLUMNS];
    for (idx, value) in values.iter_mut().enumerate() {
        *value = parse_field(record, idx, line)?;
    }
    Ok(NodeRecord {
        ref_position: Vec3::from_row_slice(&values[0..3]),
        displacement: Vec3::from_row_slice(&values[3..6]),
        // exactly nine values by the column-count check above
        triad: Mat3::from_row_slice(&values[6..15]),
        velocity: Vec3::from_row_slice(&values[15..18]),
        angular_velocity: Vec3::from_row_slice(&values[18..21]),
    })
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Write a frame file with `node_count` nodes to `dir`
    /// and return its path.
    fn write_frame(dir: &Path, n: usize, node_count: usize, time: f64) -> PathBuf {
        let mut text = String::from("N,n_steps,n_write,t,dt\n");
        text.push_str(&format!("{node_count},120,10,{time},0.001\n"));
        text.push_str("\n\n");
        for i in 0..node_count {
            let x = i as f64;
            // reference position, displacement, identity triad (row-major),
            // velocity, angular velocity
            text.push_str(&format!(
                "{x},0,0,0.5,-0.25,{i},1,0,0,0,1,0,0,0,1,0,0,2.5,0,0,0\n"
            ));
        }
        let path = dir.join(format!("{n}.csv"));
        std::fs::write(&path, text).expect("failed to write frame fixture");
        path
    }

    #[test]
    fn loads_header_and_body() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = write_frame(dir.path(), 0, 4, 0.25);

        let frame = Frame::load(&path).expect("failed to load frame");
        assert_eq!(
            frame.header,
            FrameHeader {
                node_count: 4,
                step_count: 120,
                write_interval: 10,
                time: 0.25,
                dt: 0.001,
            }
        );
        assert_eq!(frame.nodes.len(), 4, "one record per node");

        let node = &frame.nodes[2];
        assert_relative_eq!(node.ref_position, Vec3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(node.displacement, Vec3::new(0.5, -0.25, 2.0));
        assert_relative_eq!(node.triad, Mat3::identity());
        assert_relative_eq!(node.velocity, Vec3::new(0.0, 0.0, 2.5));
        assert_relative_eq!(node.angular_velocity, Vec3::zeros());
    }

    #[test]
    fn position_is_reference_plus_displacement() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = write_frame(dir.path(), 0, 3, 0.0);

        let frame = Frame::load(&path).expect("failed to load frame");
        for node in &frame.nodes {
            assert_relative_eq!(node.position(), node.ref_position + node.displacement);
        }
        assert_relative_eq!(frame.nodes[1].position(), Vec3::new(1.5, -0.25, 1.0));
    }

    #[test]
    fn triad_columns_are_basis_vectors() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        // a 90° rotation about z, flattened row-major
        let text = "labels\n1,1,1,0,0\n\n\n\
                    0,0,0,0,0,0,0,-1,0,1,0,0,0,0,1,0,0,0,0,0,0\n";
        let path = dir.path().join("0.csv");
        std::fs::write(&path, text).expect("failed to write frame fixture");

        let frame = Frame::load(&path).expect("failed to load frame");
        let triad = frame.nodes[0].triad;
        assert_relative_eq!(triad.column(0).into_owned(), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(triad.column(1).into_owned(), Vec3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(triad.column(2).into_owned(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn missing_file_is_missing_frame() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = Frame::load(&dir.path().join("42.csv")).unwrap_err();
        assert!(
            matches!(err, Error::MissingFrame(_)),
            "expected MissingFrame, got {err:?}"
        );
    }

    #[test]
    fn wrong_column_count_is_malformed() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        // 20 columns instead of 21
        let text = format!(
            "labels\n1,1,1,0,0\n\n\n{}\n",
            (0..20).map(|_| "0").collect::<Vec<_>>().join(",")
        );
        let path = dir.path().join("0.csv");
        std::fs::write(&path, text).expect("failed to write frame fixture");

        let err = Frame::load(&path).unwrap_err();
        assert!(
            matches!(err, Error::MalformedInput(_)),
            "expected MalformedInput, got {err:?}"
        );
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut text = String::from("labels\n2,1,1,0,0\n\n\n");
        text.push_str("0,0,0,0,0,0,1,0,0,0,1,0,0,0,1,0,0,0,0,0,0\n");
        text.push_str("1,0,oops,0,0,0,1,0,0,0,1,0,0,0,1,0,0,0,0,0,0\n");
        let path = dir.path().join("0.csv");
        std::fs::write(&path, text).expect("failed to write frame fixture");

        let err = Frame::load(&path).unwrap_err();
        assert!(
            matches!(err, Error::MalformedInput(_)),
            "expected MalformedInput, got {err:?}"
        );
    }

    #[test]
    fn missing_metadata_record_is_malformed() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("0.csv");
        std::fs::write(&path, "labels only\n").expect("failed to write frame fixture");

        let err = Frame::load(&path).unwrap_err();
        assert!(
            matches!(err, Error::MalformedInput(_)),
            "expected MalformedInput, got {err:?}"
        );
    }
}
