//! Scene setup: camera, lighting, node spheres, the merged edge buffer,
//! and the UI panels.

use bevy::prelude::*;
use bevy::ui::PositionType;

use crate::dataset::{party_color, PARTIES};

use super::components::{
    EdgeSegments, ExportButton, InfoPanel, InfoPanelText, MainCamera, NodeLabel, NodeSphere,
    PartySwatch, PartyToggle, SelectAllButton, Tooltip,
};
use super::constants::{
    LABEL_COLOR, LABEL_FONT_PER_RADIUS, MIN_LABEL_FONT_SIZE, NODE_METALLIC, NODE_ROUGHNESS,
    PANEL_BACKGROUND, SPHERE_SECTORS, SPHERE_STACKS, TEXT_BODY, TEXT_MUTED, TEXT_PRIMARY,
};
use super::resources::{CameraOrbit, NetworkDataRes, NodeMaterials, SegmentBufferRes};
use super::segments::SegmentBuffer;
use super::systems::camera::calculate_camera_position;

/// Setup the scene with camera, lighting, graph entities, and UI.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    data: Res<NetworkDataRes>,
    orbit: Res<CameraOrbit>,
) {
    // Camera
    let camera_pos = calculate_camera_position(&orbit);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera_pos).looking_at(orbit.target, Vec3::Y),
        MainCamera,
    ));

    // Main directional light (sun-like)
    commands.spawn((
        DirectionalLight {
            illuminance: 20000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill light from the opposite side; range scaled to the dataset since
    // bundled layouts span thousands of units.
    let light_range = (data.0.bbox.largest_extent() * 2.0).max(100.0);
    commands.spawn((
        PointLight {
            intensity: 500000.0,
            color: Color::WHITE,
            shadows_enabled: false,
            range: light_range,
            ..default()
        },
        Transform::from_translation(data.0.bbox.center() - Vec3::new(10.0, 10.0, -10.0)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    // Spawn node spheres with per-node materials and screen-space labels
    let mut node_materials = Vec::with_capacity(data.0.nodes.len());
    for (idx, node) in data.0.nodes.iter().enumerate() {
        let mesh = meshes.add(Sphere::new(node.radius).mesh().uv(SPHERE_SECTORS as u32, SPHERE_STACKS as u32));
        let material = materials.add(StandardMaterial {
            base_color: party_color(&node.party),
            metallic: NODE_METALLIC,
            perceptual_roughness: NODE_ROUGHNESS,
            emissive: LinearRgba::BLACK,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        node_materials.push(material.clone());

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(node.position),
            NodeSphere {
                node_idx: idx,
                radius: node.radius,
            },
        ));

        // Label font scales with the sphere radius.
        let font_size = (node.radius * LABEL_FONT_PER_RADIUS).max(MIN_LABEL_FONT_SIZE);
        commands.spawn((
            Text::new(&node.title),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(LABEL_COLOR),
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            NodeLabel { node_idx: idx },
        ));
    }
    commands.insert_resource(NodeMaterials(node_materials));

    // All edges in one LineList mesh; alpha starts at zero and fades in.
    let buffer = SegmentBuffer::build(&data.0);
    let mesh = meshes.add(buffer.to_mesh());
    let edge_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    });
    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(edge_material),
        Transform::default(),
        EdgeSegments,
    ));
    commands.insert_resource(SegmentBufferRes { mesh, buffer });

    // Hover tooltip (hidden until a node is under the cursor)
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        bevy::ui::Node {
            position_type: PositionType::Absolute,
            padding: UiRect::all(Val::Px(4.0)),
            ..default()
        },
        BackgroundColor(PANEL_BACKGROUND),
        Visibility::Hidden,
        Tooltip,
    ));

    // Info panel on the left
    commands
        .spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                width: Val::Px(280.0),
                min_height: Val::Px(80.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            BorderRadius::all(Val::Px(8.0)),
            InfoPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Node Info"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
            ));
            parent.spawn((
                Text::new("Click a node to isolate its neighborhood"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(TEXT_BODY),
                InfoPanelText,
            ));
        });

    spawn_legend(&mut commands);
}

/// Party legend: one toggle row per party, select-all/none, and export.
fn spawn_legend(commands: &mut Commands) {
    commands
        .spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            BorderRadius::all(Val::Px(6.0)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Party Legend"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(TEXT_MUTED),
            ));

            for party in PARTIES {
                parent
                    .spawn((
                        Button,
                        bevy::ui::Node {
                            flex_direction: FlexDirection::Row,
                            align_items: AlignItems::Center,
                            column_gap: Val::Px(6.0),
                            ..default()
                        },
                        BackgroundColor(Color::NONE),
                        PartyToggle { party },
                    ))
                    .with_children(|item| {
                        item.spawn((
                            bevy::ui::Node {
                                width: Val::Px(12.0),
                                height: Val::Px(12.0),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BackgroundColor(party_color(party)),
                            BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.3)),
                            BorderRadius::all(Val::Px(2.0)),
                            PartySwatch { party },
                        ));
                        item.spawn((
                            Text::new(party),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(TEXT_BODY),
                        ));
                    });
            }

            // Action row: select all / unselect all / export
            parent
                .spawn(bevy::ui::Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(10.0),
                    margin: UiRect::top(Val::Px(6.0)),
                    ..default()
                })
                .with_children(|row| {
                    for (label, select) in [("All", true), ("None", false)] {
                        row.spawn((
                            Button,
                            bevy::ui::Node {
                                padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgba(0.25, 0.25, 0.3, 0.9)),
                            BorderRadius::all(Val::Px(4.0)),
                            SelectAllButton { select },
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new(label),
                                TextFont {
                                    font_size: 12.0,
                                    ..default()
                                },
                                TextColor(TEXT_PRIMARY),
                            ));
                        });
                    }

                    row.spawn((
                        Button,
                        bevy::ui::Node {
                            padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.2, 0.35, 0.25, 0.9)),
                        BorderRadius::all(Val::Px(4.0)),
                        ExportButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new("Export"),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(TEXT_PRIMARY),
                        ));
                    });
                });
        });
}
