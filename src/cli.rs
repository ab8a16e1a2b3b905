// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! The same host services as the GUI, driven without a window:
//! - Listing available cameras
//! - Taking a photo
//! - Saving an image to the gallery

use snapshot::app::APP_ID;
use snapshot::backends::camera::{CameraFrame, CameraService, PipeWireCamera, enumerate_cameras};
use snapshot::backends::{DesktopLibrary, Facing, MediaLibrary};
use snapshot::config::Config;
use snapshot::constants::{CAPTURE_QUALITY, timing};
use snapshot::errors::{AppError, Capability, CameraError};
use snapshot::locator::Locator;
use snapshot::storage;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let cameras = enumerate_cameras();
    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let facing = camera
            .location
            .map(|facing| facing.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("  [{}] {} ({})", index, camera.name, facing);
    }

    Ok(())
}

/// Take a photo with the camera facing `facing`
///
/// Without `output` the photo is added to the gallery.
pub fn take_photo(facing: Facing, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let camera = PipeWireCamera::new(storage::cache_directory());
    if !camera.request_permission().is_granted() {
        return Err(AppError::PermissionDenied(Capability::Camera).into());
    }

    println!("Capturing ({})...", facing);
    let (sender, mut receiver) = futures::channel::mpsc::channel::<CameraFrame>(2);
    let session = camera.open_session(facing, sender)?;

    // Wait for the first frame (camera warm-up)
    let start = Instant::now();
    let timeout = Duration::from_secs(timing::FIRST_FRAME_TIMEOUT_SECS);
    let mut received = false;
    while start.elapsed() < timeout {
        if receiver.try_recv().is_ok() {
            received = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(16));
    }
    if !received {
        return Err(CameraError::NoFrameAvailable.into());
    }

    let locator = session.capture_still(CAPTURE_QUALITY)?;
    drop(session);

    let captured = locator
        .to_path()
        .ok_or_else(|| AppError::Other(format!("Unexpected locator {}", locator)))?;

    let delivered: Result<(), Box<dyn std::error::Error>> = match output {
        Some(path) => {
            let target = if path.is_dir() {
                path.join(captured.file_name().unwrap_or_default())
            } else {
                path
            };
            std::fs::copy(&captured, &target)
                .map(|_| println!("Photo saved: {}", target.display()))
                .map_err(Into::into)
        }
        None => save_image(&captured),
    };

    // The cached still is only a staging copy once delivered
    if delivered.is_ok() {
        storage::discard_cached(&locator, &storage::cache_directory());
    } else {
        eprintln!("Photo kept at {}", captured.display());
    }
    delivered
}

/// Add an image file to the gallery
pub fn save_image(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::canonicalize(path)?;

    let (_, config) = Config::load(APP_ID);
    let library = DesktopLibrary::new(storage::gallery_directory(config.gallery_folder()));

    if !library.request_write_permission().is_granted() {
        return Err(AppError::PermissionDenied(Capability::GalleryWrite).into());
    }

    let locator = Locator::from_path(&source)
        .ok_or_else(|| AppError::Storage(format!("Not a local file: {}", source.display())))?;
    let asset = library.create_asset(&locator).map_err(AppError::from)?;
    match asset.locator.to_path() {
        Some(stored) => println!("Saved to gallery: {}", stored.display()),
        None => println!("Saved to gallery: {}", asset.locator),
    }
    Ok(())
}
