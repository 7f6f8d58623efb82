//! End-to-end tests for the load → build → filter pipeline.
//!
//! These exercise the whole data path on real files: CSV ingestion, the
//! merged segment buffer, the visibility filter, and camera framing. No
//! window is opened.

use std::io::Write;
use std::path::Path;

use bevy::math::Vec3;
use tempfile::NamedTempFile;

use polnet::dataset::NetworkData;
use polnet::error::AppError;
use polnet::visualization::resources::VisibilityState;
use polnet::visualization::segments::SegmentBuffer;
use polnet::visualization::systems::camera::frame_orbit;
use polnet::visualization::visibility::{focus_on, node_alpha, segment_alpha};

const DIMMED: f32 = 0.05;

const NODES_CSV: &str = "\
id,x,y,z,size,party,title
n1,0,0,0,1,AKP,First
n2,10,0,0,1,CHP,Second
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

fn load(nodes: &str, edges: &str) -> NetworkData {
    let nodes = write_csv(nodes);
    let edges = write_csv(edges);
    NetworkData::load(nodes.path(), edges.path()).expect("load dataset")
}

#[test]
fn two_node_scenario_loads_and_builds_one_segment() {
    let data = load(NODES_CSV, "source,target,points\nn1,n2,0;0;0|10;0;0\n");

    assert_eq!(data.nodes.len(), 2);
    assert_eq!(data.edges.len(), 1);
    assert_eq!(data.segment_count(), 1);
    assert_eq!(data.bbox.min, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(data.bbox.max, Vec3::new(10.0, 0.0, 0.0));

    let buffer = SegmentBuffer::build(&data);
    assert_eq!(buffer.positions.len(), 2);
    assert_eq!(buffer.colors.len(), 2);
    assert_eq!(buffer.spans.len(), 1);
}

#[test]
fn focusing_overrides_every_party_filter() {
    let data = load(NODES_CSV, "source,target,points\nn1,n2,0;0;0|10;0;0\n");
    let buffer = SegmentBuffer::build(&data);

    // Empty the active-party set entirely, then focus n1.
    let n1 = data.index["n1"];
    let mut state = VisibilityState {
        active_parties: Default::default(),
        focus: None,
    };
    state.focus = Some(focus_on(n1, &buffer.spans));

    assert_eq!(node_alpha(data.index["n1"], &data, &state, DIMMED), 1.0);
    assert_eq!(node_alpha(data.index["n2"], &data, &state, DIMMED), 1.0);
    assert_eq!(segment_alpha(&buffer.spans[0], &data, &state, DIMMED), 1.0);

    // Releasing the focus reverts to the (empty) party view.
    state.focus = None;
    assert_eq!(node_alpha(n1, &data, &state, DIMMED), DIMMED);
}

#[test]
fn dangling_reference_never_reaches_the_buffer() {
    let edges = "\
source,target,points
n1,n2,0;0;0|10;0;0
n1,n3,0;0;0|5;5;5
";
    let data = load(NODES_CSV, edges);

    assert_eq!(data.edges.len(), 1);
    assert_eq!(data.stats.dangling_edges, 1);

    let buffer = SegmentBuffer::build(&data);
    assert_eq!(buffer.spans.len(), 1);
    assert_eq!(buffer.positions.len(), data.segment_count() * 2);
}

#[test]
fn segment_total_matches_polyline_points() {
    let edges = "\
source,target,points
n1,n2,0;0;0|2;1;0|5;2;0|10;0;0
n2,n1,10;0;0|0;0;0
";
    let data = load(NODES_CSV, edges);

    // (4 - 1) + (2 - 1) segments.
    assert_eq!(data.segment_count(), 4);
    let buffer = SegmentBuffer::build(&data);
    assert_eq!(buffer.positions.len(), 8);
}

#[test]
fn missing_node_file_aborts_load() {
    let edges = write_csv("source,target,points\n");
    let result = NetworkData::load(Path::new("/nonexistent/nodes.csv"), edges.path());

    assert!(matches!(result, Err(AppError::DataFetch { .. })));
}

#[test]
fn missing_edge_file_aborts_load_after_nodes() {
    let nodes = write_csv(NODES_CSV);
    let result = NetworkData::load(nodes.path(), Path::new("/nonexistent/edges.csv"));

    assert!(matches!(result, Err(AppError::DataFetch { .. })));
}

#[test]
fn camera_frames_the_loaded_bounds() {
    let data = load(NODES_CSV, "source,target,points\n");
    let orbit = frame_orbit(&data.bbox, 1.5);

    assert_eq!(orbit.target, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(orbit.distance, 15.0);
}
