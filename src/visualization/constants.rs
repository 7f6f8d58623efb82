//! Visual constants for the network scene.

use bevy::prelude::*;

// =============================================================================
// Node Appearance
// =============================================================================

/// Sphere tessellation: longitude sectors.
pub const SPHERE_SECTORS: usize = 32;
/// Sphere tessellation: latitude stacks.
pub const SPHERE_STACKS: usize = 18;

/// Metallic factor for node materials.
pub const NODE_METALLIC: f32 = 0.1;
/// Roughness for node materials.
pub const NODE_ROUGHNESS: f32 = 0.4;

/// Emissive applied to the hovered sphere.
pub const HOVER_EMISSIVE: LinearRgba = LinearRgba {
    red: 0.2,
    green: 0.2,
    blue: 0.2,
    alpha: 1.0,
}; // #333333

// =============================================================================
// Edge Appearance
// =============================================================================

/// Gradient scale at the source end of an edge.
pub const GRADIENT_SOURCE_SCALE: f32 = 1.5;
/// Gradient scale at the target end of an edge.
pub const GRADIENT_TARGET_SCALE: f32 = 0.3;

// =============================================================================
// Scene
// =============================================================================

/// Fallback background when the configured hex color does not parse.
pub const BACKGROUND_FALLBACK: Color = Color::srgb(0.012, 0.078, 0.188); // #031430

// =============================================================================
// UI Palette
// =============================================================================

/// Panel background.
pub const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.15, 0.85);
/// Headline text.
pub const TEXT_PRIMARY: Color = Color::srgb(0.9, 0.9, 0.9);
/// Section label text.
pub const TEXT_MUTED: Color = Color::srgb(0.6, 0.6, 0.6);
/// Body text.
pub const TEXT_BODY: Color = Color::srgb(0.8, 0.8, 0.8);
/// Label text over the scene.
pub const LABEL_COLOR: Color = Color::srgba(0.85, 0.85, 0.85, 0.7);

/// Minimum on-screen label font size in px.
pub const MIN_LABEL_FONT_SIZE: f32 = 5.0;
/// Label font size per unit of node radius.
pub const LABEL_FONT_PER_RADIUS: f32 = 0.1;
