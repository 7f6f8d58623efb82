//! ECS resources for the network scene.
//!
//! All mutable presentation state lives here as explicit resources; systems
//! read snapshots and write updates through change detection.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::config::Config;
use crate::dataset::{NetworkData, PARTIES};

use super::segments::SegmentBuffer;

// =============================================================================
// Camera State
// =============================================================================

/// Camera orbit state for 3D navigation.
#[derive(Resource)]
pub struct CameraOrbit {
    /// Horizontal rotation angle (radians).
    pub yaw: f32,
    /// Vertical rotation angle (radians).
    pub pitch: f32,
    /// Distance from target.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Zoom floor, derived from the framed distance.
    pub min_distance: f32,
    /// Zoom ceiling, derived from the framed distance.
    pub max_distance: f32,
    /// Distance restored by the reset key.
    pub home_distance: f32,
    /// Target restored by the reset key.
    pub home_target: Vec3,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 25.0,
            target: Vec3::ZERO,
            min_distance: 1.0,
            max_distance: 250.0,
            home_distance: 25.0,
            home_target: Vec3::ZERO,
        }
    }
}

// =============================================================================
// Dataset and Settings
// =============================================================================

/// The loaded dataset. Read-only after startup.
#[derive(Resource)]
pub struct NetworkDataRes(pub NetworkData);

/// Resolved application configuration.
#[derive(Resource, Clone)]
pub struct VizSettings(pub Config);

// =============================================================================
// Interaction State
// =============================================================================

/// Pointer interaction state machine.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerState {
    /// No hit under the cursor, nothing focused.
    #[default]
    Idle,
    /// Cursor over a node; tooltip shown. Not entered while focused.
    Hovering(usize),
    /// A node was clicked; its neighborhood is isolated.
    Focused(usize),
}

/// One focused node and its direct neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    /// Index of the focused node.
    pub node_idx: usize,
    /// Nodes sharing an edge with the focused node.
    pub neighbors: HashSet<usize>,
}

/// Party filter and focus; input to the pure visibility functions.
///
/// While `focus` is set it takes absolute precedence: `active_parties` is
/// ignored until focus clears.
#[derive(Resource, Debug, Clone)]
pub struct VisibilityState {
    /// Parties whose nodes render at full opacity.
    pub active_parties: HashSet<String>,
    /// Focused node and its adjacency set, if any.
    pub focus: Option<Focus>,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self {
            active_parties: PARTIES.iter().map(|p| p.to_string()).collect(),
            focus: None,
        }
    }
}

/// Global toggle for always-on node title labels.
#[derive(Resource, Default)]
pub struct LabelSettings {
    pub show_all: bool,
}

// =============================================================================
// Edge Fade Animation
// =============================================================================

/// Explicit edge fade-in: `current` steps toward `target` at the configured
/// rate, and the effective segment alpha is visibility × `current`.
#[derive(Resource)]
pub struct EdgeFade {
    pub current: f32,
    pub target: f32,
}

impl Default for EdgeFade {
    fn default() -> Self {
        Self {
            current: 0.0,
            target: 1.0,
        }
    }
}

// =============================================================================
// Render Handles
// =============================================================================

/// CPU copy of the merged segment buffer plus the mesh it feeds.
#[derive(Resource)]
pub struct SegmentBufferRes {
    /// Handle to the `LineList` mesh in `Assets<Mesh>`.
    pub mesh: Handle<Mesh>,
    /// Positions, gradient colors, and per-edge spans.
    pub buffer: SegmentBuffer,
}

/// One material handle per node, indexed like the dataset's node list.
///
/// Each node owns its material so alphas can diverge under focus; updates
/// mutate the material in place rather than swapping handles.
#[derive(Resource)]
pub struct NodeMaterials(pub Vec<Handle<StandardMaterial>>);
