//! Camera framing and orbit, pan, and zoom controls.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::dataset::BoundingBox;
use crate::visualization::components::MainCamera;
use crate::visualization::resources::CameraOrbit;

/// Frame the camera on the dataset bounds.
///
/// The look-at target is the box midpoint and the distance is the largest
/// axis extent times `distance_factor`, so the whole network fits the view.
/// Zoom limits and the reset frame derive from the same distance.
pub fn frame_orbit(bbox: &BoundingBox, distance_factor: f32) -> CameraOrbit {
    if bbox.is_empty() {
        return CameraOrbit::default();
    }

    let target = bbox.center();
    let distance = (bbox.largest_extent() * distance_factor).max(1.0);

    CameraOrbit {
        yaw: 0.0,
        pitch: 0.0,
        distance,
        target,
        min_distance: distance * 0.02,
        max_distance: distance * 10.0,
        home_distance: distance,
        home_target: target,
    }
}

/// Calculate camera position from orbit parameters.
pub fn calculate_camera_position(orbit: &CameraOrbit) -> Vec3 {
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    orbit.target + Vec3::new(x, y, z)
}

/// Camera orbit control system.
///
/// Controls:
/// - Right-click drag: Orbit around target
/// - Middle-click drag (or Alt+right-click): Pan
/// - Scroll wheel: Zoom
/// - WASD: Pan horizontally
/// - Q/E: Pan vertically
/// - R: Reset view
pub fn camera_orbit_system(
    mut orbit: ResMut<CameraOrbit>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
) {
    // Orbit on right-click drag (left-click is for selection)
    // Skip if Alt/Option is held (that's for panning)
    let alt_held = keyboard.pressed(KeyCode::AltLeft) || keyboard.pressed(KeyCode::AltRight);
    if mouse_button.pressed(MouseButton::Right) && !alt_held {
        for ev in mouse_motion.read() {
            orbit.yaw -= ev.delta.x * 0.01;
            orbit.pitch += ev.delta.y * 0.01;
            orbit.pitch = orbit.pitch.clamp(-1.5, 1.5);
        }
    }

    // Pan with middle-click drag OR Option/Alt + right-click (for Mac trackpads).
    // Pan and zoom speeds scale with distance; bundled layouts span
    // thousands of units.
    let is_panning = mouse_button.pressed(MouseButton::Middle)
        || (mouse_button.pressed(MouseButton::Right) && alt_held);

    if is_panning {
        let pan_scale = orbit.distance * 0.001;
        for ev in mouse_motion.read() {
            let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());
            let up = Vec3::Y;
            orbit.target += right * ev.delta.x * pan_scale;
            orbit.target -= up * ev.delta.y * pan_scale;
        }
    }

    // Zoom on scroll
    for ev in scroll.read() {
        orbit.distance -= ev.y * orbit.distance * 0.1;
        orbit.distance = orbit.distance.clamp(orbit.min_distance, orbit.max_distance);
    }

    // WASD for panning
    let pan_speed = orbit.distance * 0.01;
    let forward = Vec3::new(orbit.yaw.sin(), 0.0, orbit.yaw.cos());
    let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());

    if keyboard.pressed(KeyCode::KeyW) {
        orbit.target += forward * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        orbit.target -= forward * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        orbit.target -= right * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        orbit.target += right * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        orbit.target.y -= pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        orbit.target.y += pan_speed;
    }

    // Reset view with R
    if keyboard.just_pressed(KeyCode::KeyR) {
        orbit.yaw = 0.0;
        orbit.pitch = 0.0;
        orbit.distance = orbit.home_distance;
        orbit.target = orbit.home_target;
    }

    // Update camera transform
    if let Ok(mut transform) = camera_query.get_single_mut() {
        let pos = calculate_camera_position(&orbit);
        *transform = Transform::from_translation(pos).looking_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(min: Vec3, max: Vec3) -> BoundingBox {
        let mut bbox = BoundingBox::default();
        bbox.include(min);
        bbox.include(max);
        bbox
    }

    #[test]
    fn frames_center_and_distance_from_bounds() {
        let orbit = frame_orbit(&bbox(Vec3::ZERO, Vec3::new(10.0, 4.0, 2.0)), 1.5);

        assert_eq!(orbit.target, Vec3::new(5.0, 2.0, 1.0));
        assert_eq!(orbit.distance, 15.0);
        assert_eq!(orbit.home_distance, 15.0);
        assert!(orbit.min_distance < orbit.distance);
        assert!(orbit.max_distance > orbit.distance);
    }

    #[test]
    fn framed_camera_sits_on_positive_z_axis() {
        let orbit = frame_orbit(&bbox(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)), 1.5);
        let pos = calculate_camera_position(&orbit);

        assert_eq!(pos, orbit.target + Vec3::new(0.0, 0.0, 15.0));
    }

    #[test]
    fn empty_bounds_fall_back_to_default_frame() {
        let orbit = frame_orbit(&BoundingBox::default(), 1.5);
        assert_eq!(orbit.target, Vec3::ZERO);
        assert_eq!(orbit.distance, CameraOrbit::default().distance);
    }

    #[test]
    fn degenerate_bounds_keep_a_positive_distance() {
        let mut single = BoundingBox::default();
        single.include(Vec3::new(3.0, 3.0, 3.0));
        let orbit = frame_orbit(&single, 1.5);

        assert_eq!(orbit.target, Vec3::new(3.0, 3.0, 3.0));
        assert!(orbit.distance >= 1.0);
    }
}
