//! CSV ingestion for node and edge files.
//!
//! Rows that cannot be used are skipped, counted, and logged; only
//! transport-level failures (unreadable file, broken CSV structure) abort
//! the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bevy::math::Vec3;
use csv::StringRecord;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{AppError, RowError};

use super::{EdgeRecord, NetworkData, NodeRecord};

#[derive(Debug, Deserialize)]
struct NodeRow {
    id: String,
    x: String,
    y: String,
    z: String,
    size: String,
    party: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct EdgeRow {
    source: String,
    target: String,
    points: String,
}

impl NetworkData {
    /// Load a dataset from node and edge CSV files.
    ///
    /// Nodes are ingested completely before the edge file is opened: edge
    /// rows are validated against the final node-id set, so the ordering is
    /// a hard dependency, not an optimization.
    pub fn load(nodes_path: &Path, edges_path: &Path) -> Result<Self, AppError> {
        let nodes_file = File::open(nodes_path).map_err(|source| AppError::DataFetch {
            path: nodes_path.to_path_buf(),
            source,
        })?;

        let mut data = NetworkData::default();
        read_nodes(nodes_file, &mut data).map_err(|source| AppError::Csv {
            path: nodes_path.to_path_buf(),
            source,
        })?;

        let edges_file = File::open(edges_path).map_err(|source| AppError::DataFetch {
            path: edges_path.to_path_buf(),
            source,
        })?;
        read_edges(edges_file, &mut data).map_err(|source| AppError::Csv {
            path: edges_path.to_path_buf(),
            source,
        })?;

        info!(
            nodes = data.nodes.len(),
            edges = data.edges.len(),
            segments = data.segment_count(),
            malformed_nodes = data.stats.malformed_nodes,
            malformed_edges = data.stats.malformed_edges,
            dangling_edges = data.stats.dangling_edges,
            short_polylines = data.stats.short_polylines,
            "dataset loaded"
        );

        Ok(data)
    }
}

fn read_nodes<R: Read>(reader: R, data: &mut NetworkData) -> Result<(), csv::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping unreadable node record");
                data.stats.malformed_nodes += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_node(&record, &headers, line) {
            Ok(node) => {
                data.bbox.include(node.position);
                match data.index.get(&node.id) {
                    // Duplicate id: last write wins.
                    Some(&idx) => data.nodes[idx] = node,
                    None => {
                        data.index.insert(node.id.clone(), data.nodes.len());
                        data.nodes.push(node);
                    }
                }
                data.stats.nodes_loaded += 1;
            }
            Err(err) => {
                warn!(%err, "skipping node row");
                data.stats.malformed_nodes += 1;
            }
        }
    }

    Ok(())
}

fn parse_node(
    record: &StringRecord,
    headers: &StringRecord,
    line: u64,
) -> Result<NodeRecord, RowError> {
    let row: NodeRow = record
        .deserialize(Some(headers))
        .map_err(|err| RowError::new(line, err.to_string()))?;

    let id = row.id.trim().to_string();
    if id.is_empty() {
        return Err(RowError::new(line, "empty id"));
    }

    let x = parse_float(&row.x, "x", line)?;
    let y = parse_float(&row.y, "y", line)?;
    let z = parse_float(&row.z, "z", line)?;
    let size = parse_float(&row.size, "size", line)?;

    Ok(NodeRecord {
        id,
        title: row.title,
        party: row.party,
        position: Vec3::new(x, y, z),
        radius: size / 0.5,
    })
}

fn parse_float(field: &str, name: &str, line: u64) -> Result<f32, RowError> {
    let value: f32 = field
        .trim()
        .parse()
        .map_err(|_| RowError::new(line, format!("non-numeric {name}: {field:?}")))?;
    if !value.is_finite() {
        return Err(RowError::new(line, format!("non-finite {name}: {field:?}")));
    }
    Ok(value)
}

fn read_edges<R: Read>(reader: R, data: &mut NetworkData) -> Result<(), csv::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping unreadable edge record");
                data.stats.malformed_edges += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let row: EdgeRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(err) => {
                warn!(line, %err, "skipping edge row");
                data.stats.malformed_edges += 1;
                continue;
            }
        };

        let source = row.source.trim();
        let target = row.target.trim();
        let (Some(&source_idx), Some(&target_idx)) =
            (data.index.get(source), data.index.get(target))
        else {
            warn!(line, source, target, "dropping edge with unknown endpoint");
            data.stats.dangling_edges += 1;
            continue;
        };

        let polyline = parse_points(&row.points);
        if polyline.len() < 2 {
            warn!(line, source, target, "dropping edge with short polyline");
            data.stats.short_polylines += 1;
            continue;
        }

        data.edges.push(EdgeRecord {
            source_idx,
            target_idx,
            polyline,
        });
        data.stats.edges_loaded += 1;
    }

    Ok(())
}

/// Split the compound points field into route points.
///
/// Points are separated by `|`, coordinates within a point by `;`. A point
/// that is not exactly three finite floats is dropped from the polyline.
fn parse_points(field: &str) -> Vec<Vec3> {
    field
        .split('|')
        .filter_map(|point| {
            let mut coords = point.split(';').map(|c| c.trim().parse::<f32>());
            match (coords.next(), coords.next(), coords.next(), coords.next()) {
                (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None)
                    if x.is_finite() && y.is_finite() && z.is_finite() =>
                {
                    Some(Vec3::new(x, y, z))
                }
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::LoadStats;
    use super::*;

    const NODES_CSV: &str = "\
id,x,y,z,size,party,title
n1,0,0,0,1,AKP,First
n2,10,0,0,1,CHP,Second
";

    fn load_from_strings(nodes: &str, edges: &str) -> NetworkData {
        let mut data = NetworkData::default();
        read_nodes(nodes.as_bytes(), &mut data).expect("node csv");
        read_edges(edges.as_bytes(), &mut data).expect("edge csv");
        data
    }

    #[test]
    fn example_scenario_loads_exactly() {
        let edges = "source,target,points\nn1,n2,0;0;0|10;0;0\n";
        let data = load_from_strings(NODES_CSV, edges);

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.edges.len(), 1);
        assert_eq!(data.segment_count(), 1);
        assert_eq!(data.bbox.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(data.bbox.max, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(data.stats, LoadStats {
            nodes_loaded: 2,
            edges_loaded: 1,
            ..Default::default()
        });
    }

    #[test]
    fn node_ids_are_trimmed_and_positions_exact() {
        let nodes = "id,x,y,z,size,party,title\n  n1  ,1.5,-2.25,3.125,2,AKP,Padded\n";
        let data = load_from_strings(nodes, "source,target,points\n");

        let node = &data.nodes[0];
        assert_eq!(node.id, "n1");
        assert_eq!(node.position, Vec3::new(1.5, -2.25, 3.125));
        assert_eq!(node.radius, 4.0);
        assert!(data.index.contains_key("n1"));
    }

    #[test]
    fn duplicate_id_last_write_wins() {
        let nodes = "\
id,x,y,z,size,party,title
n1,0,0,0,1,AKP,Old
n1,5,5,5,2,CHP,New
";
        let data = load_from_strings(nodes, "source,target,points\n");

        assert_eq!(data.nodes.len(), 1);
        assert_eq!(data.nodes[0].title, "New");
        assert_eq!(data.nodes[0].party, "CHP");
        assert_eq!(data.nodes[0].position, Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn malformed_coordinates_are_skipped_not_propagated() {
        let nodes = "\
id,x,y,z,size,party,title
n1,0,0,0,1,AKP,Good
n2,oops,0,0,1,CHP,BadX
n3,NaN,0,0,1,CHP,NotANumber
n4,0,0,0,inf,CHP,InfiniteSize
";
        let data = load_from_strings(nodes, "source,target,points\n");

        assert_eq!(data.nodes.len(), 1);
        assert_eq!(data.stats.malformed_nodes, 3);
        for node in &data.nodes {
            assert!(node.position.is_finite());
        }
    }

    #[test]
    fn bbox_bounds_every_accepted_node() {
        let nodes = "\
id,x,y,z,size,party,title
n1,-3,7,1,1,AKP,A
n2,12,-4,9,1,CHP,B
n3,5,0,-8,1,HDP,C
";
        let data = load_from_strings(nodes, "source,target,points\n");

        for node in &data.nodes {
            assert!(data.bbox.min.cmple(node.position).all());
            assert!(data.bbox.max.cmpge(node.position).all());
        }
    }

    #[test]
    fn dangling_edge_is_dropped() {
        let edges = "\
source,target,points
n1,n3,0;0;0|1;1;1
n1,n2,0;0;0|10;0;0
";
        let data = load_from_strings(NODES_CSV, edges);

        assert_eq!(data.edges.len(), 1);
        assert_eq!(data.stats.dangling_edges, 1);
        assert_eq!(data.segment_count(), 1);
    }

    #[test]
    fn short_polyline_edge_is_dropped() {
        let edges = "\
source,target,points
n1,n2,0;0;0
n1,n2,5;5;bogus|0;0
";
        let data = load_from_strings(NODES_CSV, edges);

        assert!(data.edges.is_empty());
        assert_eq!(data.stats.short_polylines, 2);
    }

    #[test]
    fn edge_endpoints_are_trimmed() {
        let edges = "source,target,points\n n1 , n2 ,0;0;0|10;0;0\n";
        let data = load_from_strings(NODES_CSV, edges);

        assert_eq!(data.edges.len(), 1);
        assert_eq!(data.edges[0].source_idx, 0);
        assert_eq!(data.edges[0].target_idx, 1);
    }

    #[test]
    fn bundled_polyline_keeps_point_order() {
        let edges = "source,target,points\nn1,n2,0;0;0|2;1;0|5;2;0|10;0;0\n";
        let data = load_from_strings(NODES_CSV, edges);

        let polyline = &data.edges[0].polyline;
        assert_eq!(polyline.len(), 4);
        assert_eq!(polyline[1], Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(data.edges[0].segment_count(), 3);
    }

    #[test]
    fn bad_point_triples_are_dropped_from_polyline() {
        assert_eq!(parse_points("0;0;0|bad|1;1;1"), vec![Vec3::ZERO, Vec3::ONE]);
        assert_eq!(parse_points("0;0|0;0;0;0|;;"), Vec::<Vec3>::new());
        assert_eq!(parse_points(""), Vec::<Vec3>::new());
    }
}
