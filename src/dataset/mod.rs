//! Network dataset: typed records, bounding box, and CSV ingestion.
//!
//! The loader produces a [`NetworkData`] snapshot that the scene builder
//! consumes. Records are created once at load and never mutated afterwards;
//! all per-entity visual state (alpha, highlight) lives in the render layer.

mod loader;
mod parties;

pub use parties::{party_color, PARTIES};

use std::collections::HashMap;

use bevy::math::Vec3;

/// One entity in the network.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    /// Unique identifier (trimmed). Duplicate ids overwrite: last write wins.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Party affiliation label, key into the party color table.
    pub party: String,
    /// Position in scene space.
    pub position: Vec3,
    /// Sphere radius derived from the CSV `size` field.
    pub radius: f32,
}

/// One relationship, routed as a precomputed polyline.
///
/// Bundled edges carry curved routes with many intermediate points; straight
/// edges carry exactly two. Endpoints are indices into the node list.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    /// Index of the source node.
    pub source_idx: usize,
    /// Index of the target node.
    pub target_idx: usize,
    /// Ordered route points, at least 2.
    pub polyline: Vec<Vec3>,
}

impl EdgeRecord {
    /// Number of line segments this edge contributes to the render buffer.
    pub fn segment_count(&self) -> usize {
        self.polyline.len() - 1
    }
}

/// Axis-aligned bounding box, monotonically widened as nodes are ingested.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }
}

impl BoundingBox {
    /// Widen the box to include a point.
    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// True until at least one point has been included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Box midpoint.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    /// Largest axis extent.
    pub fn largest_extent(&self) -> f32 {
        let size = self.max - self.min;
        size.x.max(size.y).max(size.z)
    }
}

/// Counters for rows that did not make it into the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Node rows accepted.
    pub nodes_loaded: usize,
    /// Edge rows accepted.
    pub edges_loaded: usize,
    /// Node rows skipped (unparsable or non-finite fields).
    pub malformed_nodes: usize,
    /// Edge rows skipped (missing fields or unreadable records).
    pub malformed_edges: usize,
    /// Edge rows referencing an id absent from the node set.
    pub dangling_edges: usize,
    /// Edge rows whose polyline kept fewer than 2 points.
    pub short_polylines: usize,
}

/// The loaded network: nodes, resolved edges, and the scene bounding box.
#[derive(Debug, Clone, Default)]
pub struct NetworkData {
    /// Nodes in ingestion order.
    pub nodes: Vec<NodeRecord>,
    /// Node id → index into `nodes`.
    pub index: HashMap<String, usize>,
    /// Edges with both endpoints resolved.
    pub edges: Vec<EdgeRecord>,
    /// Bounds over all accepted node positions.
    pub bbox: BoundingBox,
    /// Ingestion counters.
    pub stats: LoadStats,
}

impl NetworkData {
    /// Total line segments across all accepted edges.
    pub fn segment_count(&self) -> usize {
        self.edges.iter().map(EdgeRecord::segment_count).sum()
    }

    /// Party label of a node by index.
    pub fn party_of(&self, idx: usize) -> &str {
        &self.nodes[idx].party
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_widens_monotonically() {
        let mut bbox = BoundingBox::default();
        assert!(bbox.is_empty());

        bbox.include(Vec3::new(1.0, -2.0, 3.0));
        bbox.include(Vec3::new(-4.0, 5.0, 0.0));

        assert!(!bbox.is_empty());
        assert_eq!(bbox.min, Vec3::new(-4.0, -2.0, 0.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 5.0, 3.0));
        assert_eq!(bbox.center(), Vec3::new(-1.5, 1.5, 1.5));
        assert_eq!(bbox.largest_extent(), 7.0);
    }

    #[test]
    fn segment_count_sums_over_edges() {
        let data = NetworkData {
            edges: vec![
                EdgeRecord {
                    source_idx: 0,
                    target_idx: 1,
                    polyline: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                },
                EdgeRecord {
                    source_idx: 1,
                    target_idx: 0,
                    polyline: vec![Vec3::ZERO, Vec3::X],
                },
            ],
            ..Default::default()
        };
        assert_eq!(data.segment_count(), 3);
    }
}
