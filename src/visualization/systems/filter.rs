//! Applies the visibility filter and the edge fade to the scene.

use bevy::prelude::*;

use crate::visualization::resources::{
    EdgeFade, NetworkDataRes, NodeMaterials, SegmentBufferRes, VisibilityState, VizSettings,
};
use crate::visualization::visibility::node_alpha;

/// Step the edge fade toward its target.
///
/// The fade is an explicit animation with a target and a rate; once settled
/// it stops mutating, so the filter below only rewrites the buffer while
/// something is actually changing.
pub fn edge_fade_system(time: Res<Time>, settings: Res<VizSettings>, mut fade: ResMut<EdgeFade>) {
    if fade.current == fade.target {
        return;
    }
    let step = settings.0.viz.edge_fade_rate * time.delta_secs();
    fade.current = if fade.current < fade.target {
        (fade.current + step).min(fade.target)
    } else {
        (fade.current - step).max(fade.target)
    };
}

/// Re-evaluate opacity for every entity when the filter state or fade moves.
///
/// The whole scene is recomputed on every change: a party toggle can affect
/// arbitrarily many entities, so partial updates would be incorrect. Node
/// alphas are written into per-node materials; segment alphas are one
/// rewrite of the merged buffer's color attribute.
pub fn apply_visibility_system(
    data: Res<NetworkDataRes>,
    state: Res<VisibilityState>,
    fade: Res<EdgeFade>,
    settings: Res<VizSettings>,
    buffer: Res<SegmentBufferRes>,
    node_materials: Res<NodeMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let state_changed = state.is_changed();
    let fade_changed = fade.is_changed();
    if !state_changed && !fade_changed {
        return;
    }

    let dimmed = settings.0.viz.dimmed_alpha;

    // Nodes only care about filter/focus changes, not the edge fade.
    if state_changed {
        for (idx, handle) in node_materials.0.iter().enumerate() {
            if let Some(material) = materials.get_mut(handle) {
                let alpha = node_alpha(idx, &data.0, &state, dimmed);
                material.base_color.set_alpha(alpha);
            }
        }
    }

    if let Some(mesh) = meshes.get_mut(&buffer.mesh) {
        let colors = buffer
            .buffer
            .colors_with_alpha(&data.0, &state, dimmed, fade.current);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    }
}
