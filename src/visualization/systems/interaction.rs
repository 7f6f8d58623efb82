//! Pointer hit-testing: hover highlighting and click-to-focus.
//!
//! The pointer drives an explicit state machine (`Idle`, `Hovering`,
//! `Focused`). Only node spheres are pickable; the merged edge buffer is
//! deliberately excluded from hit-testing.

use bevy::prelude::*;

use crate::visualization::components::{MainCamera, NodeSphere};
use crate::visualization::constants::HOVER_EMISSIVE;
use crate::visualization::resources::{
    NodeMaterials, PointerState, SegmentBufferRes, VisibilityState,
};
use crate::visualization::visibility::focus_on;

/// Cast the cursor ray and return the nearest intersected node sphere.
fn pick_node(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    nodes: &Query<(&NodeSphere, &Transform)>,
) -> Option<usize> {
    let cursor_pos = window.cursor_position()?;
    let ray = camera
        .viewport_to_world(camera_transform, cursor_pos)
        .ok()?;

    let mut closest: Option<(usize, f32)> = None;
    for (sphere, transform) in nodes.iter() {
        let to_node = transform.translation - ray.origin;
        let t = to_node.dot(*ray.direction);

        if t > 0.0 {
            let closest_point = ray.origin + *ray.direction * t;
            let distance = (closest_point - transform.translation).length();

            if distance < sphere.radius && closest.map_or(true, |(_, best)| t < best) {
                closest = Some((sphere.node_idx, t));
            }
        }
    }
    closest.map(|(idx, _)| idx)
}

/// Track the node under the cursor. Hover is disabled while focused, so the
/// isolated neighborhood stays stable until the focus is clicked away.
pub fn hover_system(
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    node_query: Query<(&NodeSphere, &Transform)>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut pointer: ResMut<PointerState>,
) {
    if cursor_moved.read().last().is_none() {
        return;
    }
    if matches!(*pointer, PointerState::Focused(_)) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    let next = match pick_node(window, camera, camera_transform, &node_query) {
        Some(idx) => PointerState::Hovering(idx),
        None => PointerState::Idle,
    };
    if *pointer != next {
        *pointer = next;
    }
}

/// Click to focus a node; click it again (or empty space) to release.
///
/// Focusing computes the neighbor set from segment metadata and installs it
/// in the visibility state, which takes precedence over the party filter
/// until cleared.
pub fn click_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    node_query: Query<(&NodeSphere, &Transform)>,
    segments: Res<SegmentBufferRes>,
    mut pointer: ResMut<PointerState>,
    mut visibility: ResMut<VisibilityState>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    match pick_node(window, camera, camera_transform, &node_query) {
        Some(idx) => {
            if *pointer == PointerState::Focused(idx) {
                *pointer = PointerState::Idle;
                visibility.focus = None;
            } else {
                *pointer = PointerState::Focused(idx);
                visibility.focus = Some(focus_on(idx, &segments.buffer.spans));
            }
        }
        None => {
            if *pointer != PointerState::Idle {
                *pointer = PointerState::Idle;
            }
            if visibility.focus.is_some() {
                visibility.focus = None;
            }
        }
    }
}

/// Apply the hover highlight: emissive on the hovered sphere, black on the
/// rest.
pub fn hover_highlight_system(
    pointer: Res<PointerState>,
    node_materials: Res<NodeMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !pointer.is_changed() {
        return;
    }
    let hovered = match *pointer {
        PointerState::Hovering(idx) => Some(idx),
        _ => None,
    };

    for (idx, handle) in node_materials.0.iter().enumerate() {
        if let Some(material) = materials.get_mut(handle) {
            material.emissive = if Some(idx) == hovered {
                HOVER_EMISSIVE
            } else {
                LinearRgba::BLACK
            };
        }
    }
}
