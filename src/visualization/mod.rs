//! 3D Network Visualization Module
//!
//! Renders a loaded [`NetworkData`] as spheres and bundled edges using Bevy.
//!
//! ## Module Structure
//!
//! - `components` - ECS components for nodes, the edge buffer, labels, UI
//! - `resources` - ECS resources for state (camera, pointer, visibility)
//! - `segments` - Merged line-segment buffer construction
//! - `visibility` - Pure opacity functions over the filter state
//! - `systems` - ECS systems (camera, interaction, filter, UI, export)
//! - `setup` - Scene initialization
//! - `plugin` - Bevy plugin definition
//! - `constants` - Colors, sizes, and other constants

pub mod components;
pub mod constants;
pub mod plugin;
pub mod resources;
pub mod segments;
pub mod setup;
pub mod systems;
pub mod visibility;

pub use plugin::VisualizationPlugin;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::config::Config;
use crate::dataset::NetworkData;
use constants::BACKGROUND_FALLBACK;
use systems::camera::frame_orbit;

/// Run the visualizer on a loaded dataset.
///
/// This spawns a Bevy window with the 3D network scene and blocks until the
/// window is closed. An empty dataset renders an empty scene; the app stays
/// interactive either way.
pub fn run_visualizer(data: NetworkData, config: Config) {
    let orbit = frame_orbit(&data.bbox, config.viz.camera_distance_factor);

    let background = match Srgba::hex(&config.viz.background) {
        Ok(color) => Color::Srgba(color),
        Err(err) => {
            tracing::warn!(%err, value = %config.viz.background, "invalid background color");
            BACKGROUND_FALLBACK
        }
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Polnet Network Visualizer".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                // The CLI installs the tracing subscriber before the app starts.
                .disable::<LogPlugin>(),
        )
        .insert_resource(ClearColor(background))
        .insert_resource(orbit)
        .add_plugins(VisualizationPlugin::new(data, config))
        .run();
}
