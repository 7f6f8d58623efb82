//! Pure visibility functions.
//!
//! Opacity is a function of `(entity, VisibilityState)` and nothing else:
//! applying it twice with the same state yields the same alphas. Whenever
//! the party set or focus changes, the filter is re-evaluated for every
//! entity; partial updates would be wrong because a party toggle can affect
//! arbitrarily many nodes and segments.

use std::collections::HashSet;

use crate::dataset::NetworkData;

use super::resources::{Focus, VisibilityState};
use super::segments::SegmentSpan;

/// Alpha for a node under the current state.
///
/// Focus takes absolute precedence: while set, only the focused node and
/// its neighbors are fully visible and the party filter is ignored.
pub fn node_alpha(node_idx: usize, data: &NetworkData, state: &VisibilityState, dimmed: f32) -> f32 {
    match &state.focus {
        Some(focus) => {
            if node_idx == focus.node_idx || focus.neighbors.contains(&node_idx) {
                1.0
            } else {
                dimmed
            }
        }
        None => {
            if state.active_parties.contains(data.party_of(node_idx)) {
                1.0
            } else {
                dimmed
            }
        }
    }
}

/// Alpha for an edge span under the current state.
///
/// Symmetric rule: fully visible when both endpoint parties are active, or
/// when the span touches the focused node.
pub fn segment_alpha(
    span: &SegmentSpan,
    data: &NetworkData,
    state: &VisibilityState,
    dimmed: f32,
) -> f32 {
    match &state.focus {
        Some(focus) => {
            if span.source_idx == focus.node_idx || span.target_idx == focus.node_idx {
                1.0
            } else {
                dimmed
            }
        }
        None => {
            let source_active = state.active_parties.contains(data.party_of(span.source_idx));
            let target_active = state.active_parties.contains(data.party_of(span.target_idx));
            if source_active && target_active {
                1.0
            } else {
                dimmed
            }
        }
    }
}

/// Build the focus for a node by scanning segment metadata for its
/// direct neighbors.
pub fn focus_on(node_idx: usize, spans: &[SegmentSpan]) -> Focus {
    let mut neighbors = HashSet::new();
    for span in spans {
        if span.source_idx == node_idx {
            neighbors.insert(span.target_idx);
        }
        if span.target_idx == node_idx {
            neighbors.insert(span.source_idx);
        }
    }
    Focus {
        node_idx,
        neighbors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{NetworkData, NodeRecord};
    use bevy::math::Vec3;

    const DIMMED: f32 = 0.05;

    fn node(id: &str, party: &str) -> NodeRecord {
        NodeRecord {
            id: id.into(),
            title: id.to_uppercase(),
            party: party.into(),
            position: Vec3::ZERO,
            radius: 1.0,
        }
    }

    fn span(source_idx: usize, target_idx: usize) -> SegmentSpan {
        SegmentSpan {
            source_idx,
            target_idx,
            vertex_start: 0,
            vertex_end: 2,
        }
    }

    fn test_data() -> NetworkData {
        NetworkData {
            nodes: vec![node("n1", "AKP"), node("n2", "CHP"), node("n3", "HDP")],
            ..Default::default()
        }
    }

    #[test]
    fn party_filter_drives_node_alpha_without_focus() {
        let data = test_data();
        let mut state = VisibilityState::default();
        state.active_parties.remove("CHP");

        assert_eq!(node_alpha(0, &data, &state, DIMMED), 1.0);
        assert_eq!(node_alpha(1, &data, &state, DIMMED), DIMMED);
    }

    #[test]
    fn edge_needs_both_endpoint_parties_active() {
        let data = test_data();
        let mut state = VisibilityState::default();
        state.active_parties.remove("CHP");

        // n1(AKP)-n3(HDP) visible, n1(AKP)-n2(CHP) dimmed.
        assert_eq!(segment_alpha(&span(0, 2), &data, &state, DIMMED), 1.0);
        assert_eq!(segment_alpha(&span(0, 1), &data, &state, DIMMED), DIMMED);
        assert_eq!(segment_alpha(&span(1, 0), &data, &state, DIMMED), DIMMED);
    }

    #[test]
    fn focus_overrides_party_filter() {
        let data = test_data();
        let spans = [span(0, 1)];

        // Party filter excludes the focused node's own party.
        let mut state = VisibilityState::default();
        state.active_parties.remove("AKP");
        state.focus = Some(focus_on(0, &spans));

        assert_eq!(node_alpha(0, &data, &state, DIMMED), 1.0);
        assert_eq!(node_alpha(1, &data, &state, DIMMED), 1.0);
        assert_eq!(node_alpha(2, &data, &state, DIMMED), DIMMED);
        assert_eq!(segment_alpha(&spans[0], &data, &state, DIMMED), 1.0);
    }

    #[test]
    fn clearing_focus_reverts_to_party_view() {
        let data = test_data();
        let mut state = VisibilityState::default();
        state.active_parties.remove("HDP");
        state.focus = Some(focus_on(0, &[span(0, 1)]));

        assert_eq!(node_alpha(2, &data, &state, DIMMED), DIMMED);
        state.focus = None;
        assert_eq!(node_alpha(0, &data, &state, DIMMED), 1.0);
        assert_eq!(node_alpha(2, &data, &state, DIMMED), DIMMED);
    }

    #[test]
    fn filter_is_idempotent() {
        let data = test_data();
        let mut state = VisibilityState::default();
        state.active_parties.remove("AKP");

        for idx in 0..data.nodes.len() {
            let once = node_alpha(idx, &data, &state, DIMMED);
            let twice = node_alpha(idx, &data, &state, DIMMED);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn focus_neighbors_come_from_segment_metadata() {
        let spans = [span(0, 1), span(2, 0), span(1, 2)];
        let focus = focus_on(0, &spans);

        assert_eq!(focus.node_idx, 0);
        assert_eq!(focus.neighbors, HashSet::from([1, 2]));

        let focus = focus_on(1, &spans);
        assert_eq!(focus.neighbors, HashSet::from([0, 2]));
    }
}
