//! ECS systems for the network scene.
//!
//! Systems are functions that operate on components and resources each frame.

pub mod camera;
pub mod export;
pub mod filter;
pub mod interaction;
pub mod ui;

pub use camera::camera_orbit_system;
pub use export::{
    begin_export_system, capture_export_system, request_export_system, ExportRequested,
};
pub use filter::{apply_visibility_system, edge_fade_system};
pub use interaction::{click_system, hover_highlight_system, hover_system};
pub use ui::{
    info_panel_system, party_toggle_system, select_all_system, toggle_labels_system,
    tooltip_system, update_labels_system, update_swatches_system,
};
