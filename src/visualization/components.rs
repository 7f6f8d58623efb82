//! ECS components for the network scene.
//!
//! Every renderable carries a tagged component identifying what it is, so
//! systems never inspect mesh or material types to tell nodes from edges.

use bevy::prelude::*;

/// The window-facing camera (exports spawn a second, off-screen one).
#[derive(Component)]
pub struct MainCamera;

/// Sphere entity representing one network node.
#[derive(Component)]
pub struct NodeSphere {
    /// Index into the dataset's node list.
    pub node_idx: usize,
    /// Visual radius, used for ray hit-testing.
    pub radius: f32,
}

/// The single merged line-segment mesh holding every edge.
///
/// Excluded from hit-testing; visibility changes rewrite its color
/// attribute instead of touching per-edge materials.
#[derive(Component)]
pub struct EdgeSegments;

/// Screen-space title label following a node.
#[derive(Component)]
pub struct NodeLabel {
    /// Index of the node this label follows.
    pub node_idx: usize,
}

/// Tooltip text shown at the hovered node's projected position.
#[derive(Component)]
pub struct Tooltip;

/// Marker for the focused-node info panel container.
#[derive(Component)]
pub struct InfoPanel;

/// Marker for the info panel text content.
#[derive(Component)]
pub struct InfoPanelText;

/// Legend entry button toggling one party's visibility.
#[derive(Component)]
pub struct PartyToggle {
    pub party: &'static str,
}

/// Color swatch inside a legend entry, dimmed while the party is inactive.
#[derive(Component)]
pub struct PartySwatch {
    pub party: &'static str,
}

/// Legend button selecting or clearing all parties at once.
#[derive(Component)]
pub struct SelectAllButton {
    /// true = activate every party, false = clear the set.
    pub select: bool,
}

/// Button requesting a PNG/PDF export of the current frame.
#[derive(Component)]
pub struct ExportButton;
