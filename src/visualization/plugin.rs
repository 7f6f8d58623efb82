//! Visualization plugin for Bevy.

use bevy::prelude::*;

use crate::config::Config;
use crate::dataset::NetworkData;

use super::resources::{
    CameraOrbit, EdgeFade, LabelSettings, NetworkDataRes, PointerState, VisibilityState,
    VizSettings,
};
use super::setup::setup_scene;
use super::systems;

/// Plugin that adds the 3D network visualization.
pub struct VisualizationPlugin {
    /// Loaded dataset to render.
    pub data: NetworkData,
    /// Resolved configuration.
    pub config: Config,
}

impl VisualizationPlugin {
    /// Create a new visualization plugin.
    pub fn new(data: NetworkData, config: Config) -> Self {
        Self { data, config }
    }
}

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Only inserts CameraOrbit if not already set (allows pre-framing)
            .init_resource::<CameraOrbit>()
            .insert_resource(NetworkDataRes(self.data.clone()))
            .insert_resource(VizSettings(self.config.clone()))
            .init_resource::<PointerState>()
            .init_resource::<VisibilityState>()
            .init_resource::<EdgeFade>()
            .init_resource::<LabelSettings>()
            .add_event::<systems::ExportRequested>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    systems::camera_orbit_system,
                    systems::hover_system,
                    systems::click_system,
                    systems::hover_highlight_system,
                ),
            )
            .add_systems(
                Update,
                (
                    systems::edge_fade_system,
                    systems::apply_visibility_system.after(systems::edge_fade_system),
                ),
            )
            .add_systems(
                Update,
                (
                    systems::toggle_labels_system,
                    systems::update_labels_system,
                    systems::tooltip_system,
                    systems::info_panel_system,
                    systems::party_toggle_system,
                    systems::select_all_system,
                    systems::update_swatches_system,
                ),
            )
            .add_systems(
                Update,
                (
                    systems::request_export_system,
                    systems::begin_export_system,
                    systems::capture_export_system,
                ),
            );
    }
}
