//! Frame export: high-resolution capture to PNG and a single-page PDF.
//!
//! The export renders into an off-screen target at a multiple of the window
//! resolution with a transparent clear color, so the window itself never
//! flickers and the artifacts have no background. The capture rig (target
//! image + second camera) is torn down as soon as the frame arrives,
//! whether or not encoding succeeded.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::render::view::screenshot::{Screenshot, ScreenshotCaptured};
use tracing::{error, info};

use crate::error::AppError;
use crate::visualization::components::{ExportButton, MainCamera};
use crate::visualization::resources::VizSettings;

/// Base name for exported artifacts.
const EXPORT_BASENAME: &str = "network-visualization";

/// Raster density used for the PDF page, so page size equals raster size.
const PDF_DPI: f32 = 96.0;
const MM_PER_INCH: f32 = 25.4;

/// Frames to let the off-screen target render before reading it back.
const WARMUP_FRAMES: u32 = 3;

/// Fired by the export button or the X key.
#[derive(Event)]
pub struct ExportRequested;

/// In-flight export: the render target, the camera feeding it, and how long
/// it has been warming up.
#[derive(Resource)]
pub struct ExportJob {
    pub target: Handle<Image>,
    pub camera: Entity,
    pub frames_waited: u32,
    pub capture_spawned: bool,
}

/// Collect export requests from the button and the keyboard.
pub fn request_export_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    interactions: Query<&Interaction, (Changed<Interaction>, With<ExportButton>)>,
    mut events: EventWriter<ExportRequested>,
) {
    let button_pressed = interactions.iter().any(|i| *i == Interaction::Pressed);
    if button_pressed || keyboard.just_pressed(KeyCode::KeyX) {
        events.send(ExportRequested);
    }
}

/// Start an export: allocate the upscaled render target and spawn a camera
/// cloned from the main view, clearing to transparent.
pub fn begin_export_system(
    mut events: EventReader<ExportRequested>,
    job: Option<Res<ExportJob>>,
    windows: Query<&Window>,
    main_camera: Query<&Transform, With<MainCamera>>,
    settings: Res<VizSettings>,
    mut images: ResMut<Assets<Image>>,
    mut commands: Commands,
) {
    if events.read().count() == 0 {
        return;
    }
    // One export at a time.
    if job.is_some() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok(main_transform) = main_camera.get_single() else {
        return;
    };

    let scale = settings.0.export.scale_factor.max(1);
    let size = Extent3d {
        width: window.physical_width() * scale,
        height: window.physical_height() * scale,
        depth_or_array_layers: 1,
    };

    let mut image = Image::new_fill(
        size,
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::COPY_SRC
        | TextureUsages::RENDER_ATTACHMENT;
    let target = images.add(image);

    let camera = commands
        .spawn((
            Camera3d::default(),
            Camera {
                target: RenderTarget::Image(target.clone()),
                clear_color: ClearColorConfig::Custom(Color::NONE),
                order: -1,
                ..default()
            },
            *main_transform,
        ))
        .id();

    commands.insert_resource(ExportJob {
        target,
        camera,
        frames_waited: 0,
        capture_spawned: false,
    });
    info!(width = size.width, height = size.height, "export started");
}

/// Once the target has rendered, read it back and write the artifacts.
pub fn capture_export_system(
    job: Option<ResMut<ExportJob>>,
    settings: Res<VizSettings>,
    mut commands: Commands,
) {
    let Some(mut job) = job else {
        return;
    };
    if job.capture_spawned {
        return;
    }
    job.frames_waited += 1;
    if job.frames_waited < WARMUP_FRAMES {
        return;
    }
    job.capture_spawned = true;

    let camera = job.camera;
    let export_dir = settings.0.export.directory.clone();

    commands.spawn(Screenshot::image(job.target.clone())).observe(
        move |trigger: Trigger<ScreenshotCaptured>, mut commands: Commands| {
            // Tear the capture rig down first: the restore happens even if
            // encoding fails below.
            commands.entity(camera).despawn();
            commands.remove_resource::<ExportJob>();

            if let Err(err) = write_artifacts(&trigger.event().0, &export_dir) {
                error!(%err, "export failed");
            }
        },
    );
}

/// Encode the captured frame as PNG and wrap it in a single-page PDF.
fn write_artifacts(frame: &Image, dir: &Path) -> Result<(), AppError> {
    let dynamic = frame
        .clone()
        .try_into_dynamic()
        .map_err(|err| AppError::Export(err.to_string()))?;

    std::fs::create_dir_all(dir).map_err(|err| AppError::Export(err.to_string()))?;

    let png_path = dir.join(format!("{EXPORT_BASENAME}.png"));
    dynamic
        .to_rgba8()
        .save(&png_path)
        .map_err(|err| AppError::Export(err.to_string()))?;

    let pdf_path = dir.join(format!("{EXPORT_BASENAME}.pdf"));
    write_pdf(&dynamic, &pdf_path)?;

    info!(png = %png_path.display(), pdf = %pdf_path.display(), "export complete");
    Ok(())
}

/// Single landscape page sized to the raster, raster at the origin.
fn write_pdf(frame: &image::DynamicImage, path: &Path) -> Result<(), AppError> {
    use printpdf::{image_crate, ImageTransform, Mm, PdfDocument};

    let page_width = Mm(frame.width() as f32 * MM_PER_INCH / PDF_DPI);
    let page_height = Mm(frame.height() as f32 * MM_PER_INCH / PDF_DPI);
    let (doc, page, layer) = PdfDocument::new(EXPORT_BASENAME, page_width, page_height, "frame");

    // PDF rasters carry no alpha channel; flatten before embedding. The
    // buffer goes through printpdf's image re-export so the pixel types
    // line up with what it links against.
    let rgb = frame.to_rgb8().into_raw();
    let flattened = image_crate::RgbImage::from_raw(frame.width(), frame.height(), rgb)
        .map(image_crate::DynamicImage::ImageRgb8)
        .ok_or_else(|| AppError::Export("raster buffer size mismatch".to_string()))?;
    let pdf_image = printpdf::Image::from_dynamic_image(&flattened);
    pdf_image.add_to_layer(
        doc.get_page(page).get_layer(layer),
        ImageTransform {
            dpi: Some(PDF_DPI),
            ..Default::default()
        },
    );

    let file = File::create(path).map_err(|err| AppError::Export(err.to_string()))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|err| AppError::Export(err.to_string()))?;
    Ok(())
}
