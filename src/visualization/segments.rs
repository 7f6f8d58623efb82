//! Merged line-segment buffer for edge rendering.
//!
//! Thousands of individual line primitives mean thousands of draw calls, so
//! every edge polyline is flattened into one `LineList` mesh with per-vertex
//! color and alpha. Visibility updates rewrite the color attribute once
//! instead of mutating per-edge materials.

use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use crate::dataset::{party_color, NetworkData};

use super::constants::{GRADIENT_SOURCE_SCALE, GRADIENT_TARGET_SCALE};
use super::resources::VisibilityState;
use super::visibility::segment_alpha;

/// One edge's run of segments inside the merged buffer.
///
/// Carries the endpoint identities so visibility can be resolved per edge
/// without re-walking the original edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    /// Index of the source node.
    pub source_idx: usize,
    /// Index of the target node.
    pub target_idx: usize,
    /// First vertex of this edge in the buffer.
    pub vertex_start: usize,
    /// One past the last vertex of this edge.
    pub vertex_end: usize,
}

/// CPU-side contents of the merged segment mesh.
#[derive(Debug, Clone, Default)]
pub struct SegmentBuffer {
    /// Two vertices per segment.
    pub positions: Vec<[f32; 3]>,
    /// RGBA per vertex: RGB is the fixed gradient, alpha is rewritten by
    /// the visibility filter.
    pub colors: Vec<[f32; 4]>,
    /// Per-edge metadata, in buffer order.
    pub spans: Vec<SegmentSpan>,
}

impl SegmentBuffer {
    /// Flatten all accepted edges into one buffer.
    ///
    /// Two passes: the exact vertex count is known up front
    /// (2 × Σ(point_count − 1)), so both attribute vectors are allocated
    /// once and filled without resizing.
    pub fn build(data: &NetworkData) -> Self {
        let vertex_count = data.segment_count() * 2;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut colors = Vec::with_capacity(vertex_count);
        let mut spans = Vec::with_capacity(data.edges.len());

        for edge in &data.edges {
            let base = party_color(data.party_of(edge.source_idx)).to_linear();
            let vertex_start = positions.len();

            let last = edge.polyline.len() - 1;
            for (i, window) in edge.polyline.windows(2).enumerate() {
                positions.push(window[0].to_array());
                positions.push(window[1].to_array());
                colors.push(gradient_color(base, i, last));
                colors.push(gradient_color(base, i + 1, last));
            }

            spans.push(SegmentSpan {
                source_idx: edge.source_idx,
                target_idx: edge.target_idx,
                vertex_start,
                vertex_end: positions.len(),
            });
        }

        debug_assert_eq!(positions.len(), vertex_count);

        Self {
            positions,
            colors,
            spans,
        }
    }

    /// Build the renderable mesh from this buffer.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors.clone());
        mesh
    }

    /// Gradient colors with per-vertex alpha resolved against the current
    /// visibility state, scaled by the fade factor.
    pub fn colors_with_alpha(
        &self,
        data: &NetworkData,
        state: &VisibilityState,
        dimmed: f32,
        fade: f32,
    ) -> Vec<[f32; 4]> {
        let mut colors = self.colors.clone();
        for span in &self.spans {
            let alpha = segment_alpha(span, data, state, dimmed) * fade;
            for color in &mut colors[span.vertex_start..span.vertex_end] {
                color[3] = alpha;
            }
        }
        colors
    }
}

/// Per-vertex gradient: bright at the source end, dark at the target end.
fn gradient_color(base: LinearRgba, point: usize, last_point: usize) -> [f32; 4] {
    let t = point as f32 / last_point.max(1) as f32;
    let scale = GRADIENT_SOURCE_SCALE + (GRADIENT_TARGET_SCALE - GRADIENT_SOURCE_SCALE) * t;
    [base.red * scale, base.green * scale, base.blue * scale, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{EdgeRecord, NodeRecord};

    fn test_data() -> NetworkData {
        let nodes = vec![
            NodeRecord {
                id: "n1".into(),
                title: "First".into(),
                party: "AKP".into(),
                position: Vec3::ZERO,
                radius: 2.0,
            },
            NodeRecord {
                id: "n2".into(),
                title: "Second".into(),
                party: "CHP".into(),
                position: Vec3::new(10.0, 0.0, 0.0),
                radius: 2.0,
            },
        ];
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        NetworkData {
            nodes,
            index,
            edges: vec![
                EdgeRecord {
                    source_idx: 0,
                    target_idx: 1,
                    polyline: vec![
                        Vec3::ZERO,
                        Vec3::new(3.0, 1.0, 0.0),
                        Vec3::new(7.0, 1.0, 0.0),
                        Vec3::new(10.0, 0.0, 0.0),
                    ],
                },
                EdgeRecord {
                    source_idx: 1,
                    target_idx: 0,
                    polyline: vec![Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO],
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn buffer_is_sized_exactly() {
        let data = test_data();
        let buffer = SegmentBuffer::build(&data);

        // 3 segments + 1 segment, two vertices each.
        assert_eq!(data.segment_count(), 4);
        assert_eq!(buffer.positions.len(), 8);
        assert_eq!(buffer.colors.len(), 8);
        assert_eq!(buffer.positions.capacity(), 8);
    }

    #[test]
    fn spans_partition_the_buffer() {
        let buffer = SegmentBuffer::build(&test_data());

        assert_eq!(buffer.spans.len(), 2);
        assert_eq!(buffer.spans[0].vertex_start, 0);
        assert_eq!(buffer.spans[0].vertex_end, 6);
        assert_eq!(buffer.spans[1].vertex_start, 6);
        assert_eq!(buffer.spans[1].vertex_end, 8);
        assert_eq!(buffer.spans[0].source_idx, 0);
        assert_eq!(buffer.spans[0].target_idx, 1);
    }

    #[test]
    fn gradient_runs_bright_to_dark() {
        let data = test_data();
        let buffer = SegmentBuffer::build(&data);
        let base = party_color("AKP").to_linear();

        let first = buffer.colors[0];
        let last = buffer.colors[5];
        assert!((first[0] - base.red * GRADIENT_SOURCE_SCALE).abs() < 1e-6);
        assert!((last[0] - base.red * GRADIENT_TARGET_SCALE).abs() < 1e-6);
        // Monotonically darker along the polyline.
        assert!(first[0] > buffer.colors[2][0]);
        assert!(buffer.colors[2][0] > last[0]);
    }

    #[test]
    fn alpha_rewrite_covers_whole_spans() {
        let data = test_data();
        let buffer = SegmentBuffer::build(&data);
        let mut state = VisibilityState::default();
        state.active_parties.remove("CHP");

        let colors = buffer.colors_with_alpha(&data, &state, 0.05, 1.0);
        // Both edges touch a CHP endpoint, so every vertex is dimmed.
        assert!(colors.iter().all(|c| (c[3] - 0.05).abs() < 1e-6));

        let colors = buffer.colors_with_alpha(&data, &VisibilityState::default(), 0.05, 0.5);
        assert!(colors.iter().all(|c| (c[3] - 0.5).abs() < 1e-6));
    }
}
