//! UI systems: node labels, hover tooltip, info panel, and legend toggles.

use bevy::prelude::*;
use bevy::ui::Node as UiNode;

use crate::dataset::party_color;
use crate::visualization::components::{
    InfoPanelText, MainCamera, NodeLabel, PartySwatch, PartyToggle, SelectAllButton, Tooltip,
};
use crate::visualization::resources::{
    LabelSettings, NetworkDataRes, PointerState, VisibilityState, VizSettings,
};
use crate::visualization::visibility::node_alpha;

/// Toggle always-on node titles with L.
pub fn toggle_labels_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut labels: ResMut<LabelSettings>,
) {
    if keyboard.just_pressed(KeyCode::KeyL) {
        labels.show_all = !labels.show_all;
    }
}

/// Project node positions to screen space and place title labels.
///
/// Labels only show while the global toggle is on, and only for nodes the
/// visibility filter leaves fully visible.
pub fn update_labels_system(
    labels: Res<LabelSettings>,
    data: Res<NetworkDataRes>,
    state: Res<VisibilityState>,
    settings: Res<VizSettings>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut label_query: Query<(&mut UiNode, &mut Visibility, &NodeLabel)>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let dimmed = settings.0.viz.dimmed_alpha;

    for (mut node_ui, mut visibility, label) in label_query.iter_mut() {
        let Some(record) = data.0.nodes.get(label.node_idx) else {
            continue;
        };

        let alpha = node_alpha(label.node_idx, &data.0, &state, dimmed);
        if !labels.show_all || alpha < 0.5 {
            *visibility = Visibility::Hidden;
            continue;
        }

        // Offset just above the sphere so the label doesn't overlap it.
        let world_pos = record.position + Vec3::Y * (record.radius * 1.2);

        if let Ok(viewport_pos) = camera.world_to_viewport(camera_transform, world_pos) {
            let to_node = world_pos - camera_transform.translation();
            let is_in_front = to_node.dot(*camera_transform.forward()) > 0.0;

            if is_in_front {
                *visibility = Visibility::Visible;
                node_ui.left = Val::Px(viewport_pos.x - 40.0);
                node_ui.top = Val::Px(viewport_pos.y - 10.0);
            } else {
                *visibility = Visibility::Hidden;
            }
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Show the hovered node's title at its projected screen position.
pub fn tooltip_system(
    pointer: Res<PointerState>,
    data: Res<NetworkDataRes>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut tooltip_query: Query<(&mut Text, &mut UiNode, &mut Visibility), With<Tooltip>>,
) {
    let Ok((mut text, mut node_ui, mut visibility)) = tooltip_query.get_single_mut() else {
        return;
    };

    let PointerState::Hovering(idx) = *pointer else {
        if pointer.is_changed() {
            *visibility = Visibility::Hidden;
        }
        return;
    };
    let Some(record) = data.0.nodes.get(idx) else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    if pointer.is_changed() {
        **text = record.title.clone();
        *visibility = Visibility::Visible;
    }

    // Follow the node even while the camera moves.
    if let Ok(viewport_pos) = camera.world_to_viewport(camera_transform, record.position) {
        node_ui.left = Val::Px(viewport_pos.x + 12.0);
        node_ui.top = Val::Px(viewport_pos.y - 12.0);
    }
}

/// Update the info panel when the focus changes.
pub fn info_panel_system(
    pointer: Res<PointerState>,
    state: Res<VisibilityState>,
    data: Res<NetworkDataRes>,
    mut text_query: Query<&mut Text, With<InfoPanelText>>,
) {
    if !pointer.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    match *pointer {
        PointerState::Focused(idx) => {
            let Some(record) = data.0.nodes.get(idx) else {
                return;
            };
            let neighbor_count = state
                .focus
                .as_ref()
                .map(|focus| focus.neighbors.len())
                .unwrap_or(0);

            **text = format!(
                "\n{}\nID: {}\nParty: {}\nConnections: {}\n\nClick again to release",
                record.title, record.id, record.party, neighbor_count
            );
        }
        _ => {
            **text = "Click a node to isolate its neighborhood".to_string();
        }
    }
}

/// Legend entries toggle their party in the active set.
pub fn party_toggle_system(
    interactions: Query<(&Interaction, &PartyToggle), Changed<Interaction>>,
    mut state: ResMut<VisibilityState>,
) {
    for (interaction, toggle) in interactions.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if !state.active_parties.remove(toggle.party) {
            state.active_parties.insert(toggle.party.to_string());
        }
    }
}

/// All/None buttons rewrite the whole active set at once.
pub fn select_all_system(
    interactions: Query<(&Interaction, &SelectAllButton), Changed<Interaction>>,
    mut state: ResMut<VisibilityState>,
) {
    for (interaction, button) in interactions.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if button.select {
            let focus = state.focus.clone();
            *state = VisibilityState {
                focus,
                ..Default::default()
            };
        } else {
            state.active_parties.clear();
        }
    }
}

/// Dim legend swatches for inactive parties.
pub fn update_swatches_system(
    state: Res<VisibilityState>,
    mut swatches: Query<(&PartySwatch, &mut BackgroundColor)>,
) {
    if !state.is_changed() {
        return;
    }
    for (swatch, mut background) in swatches.iter_mut() {
        let alpha = if state.active_parties.contains(swatch.party) {
            1.0
        } else {
            0.15
        };
        *background = BackgroundColor(party_color(swatch.party).with_alpha(alpha));
    }
}
