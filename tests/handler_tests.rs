// SPDX-License-Identifier: GPL-3.0-only

//! Host calls made by the handlers, driven with fake services

use snapshot::app::handlers::{capture, gallery, permissions, release_image, save};
use snapshot::app::screen::{SaveOutcome, Screen};
use snapshot::backends::camera::{CameraService, CameraSession, FrameSender};
use snapshot::backends::{
    Asset, Facing, ImagePicker, MediaLibrary, PermissionStatus, PickOutcome, PickerOptions,
};
use snapshot::constants::{CAPTURE_QUALITY, Quality};
use snapshot::errors::{CameraError, LibraryError, PickerError};
use snapshot::locator::Locator;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn photo() -> Locator {
    Locator::new("file:///tmp/photo123.jpg")
}

struct FakeSession {
    result: Result<Locator, CameraError>,
    qualities: Mutex<Vec<Quality>>,
}

impl CameraSession for FakeSession {
    fn facing(&self) -> Facing {
        Facing::Back
    }

    fn capture_still(&self, quality: Quality) -> Result<Locator, CameraError> {
        self.qualities.lock().unwrap().push(quality);
        self.result.clone()
    }
}

struct FakeCamera {
    status: PermissionStatus,
    calls: AtomicUsize,
}

impl CameraService for FakeCamera {
    fn request_permission(&self) -> PermissionStatus {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.status
    }

    fn open_session(
        &self,
        _facing: Facing,
        _frames: FrameSender,
    ) -> Result<Arc<dyn CameraSession>, CameraError> {
        Err(CameraError::NoCameraFound)
    }
}

struct FakePicker {
    status: PermissionStatus,
    outcome: Result<PickOutcome, PickerError>,
    options: Mutex<Vec<PickerOptions>>,
}

impl ImagePicker for FakePicker {
    fn request_read_permission(&self) -> PermissionStatus {
        self.status
    }

    fn pick_image(&self, options: &PickerOptions) -> Result<PickOutcome, PickerError> {
        self.options.lock().unwrap().push(*options);
        self.outcome.clone()
    }
}

struct FakeLibrary {
    status: PermissionStatus,
    result: Result<Asset, LibraryError>,
    permission_requests: AtomicUsize,
    created: Mutex<Vec<Locator>>,
}

impl FakeLibrary {
    fn new(status: PermissionStatus, result: Result<Asset, LibraryError>) -> Arc<Self> {
        Arc::new(Self {
            status,
            result,
            permission_requests: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        })
    }
}

impl MediaLibrary for FakeLibrary {
    fn request_write_permission(&self) -> PermissionStatus {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        self.status
    }

    fn create_asset(&self, locator: &Locator) -> Result<Asset, LibraryError> {
        self.created.lock().unwrap().push(locator.clone());
        self.result.clone()
    }
}

fn asset() -> Asset {
    Asset {
        id: "asset-1".to_string(),
        locator: Locator::new("file:///home/user/Pictures/Snapshot/IMG_1.jpg"),
    }
}

#[tokio::test]
async fn test_camera_permission_is_requested_once() {
    let camera = Arc::new(FakeCamera {
        status: PermissionStatus::Denied,
        calls: AtomicUsize::new(0),
    });

    let status = permissions::request_camera_permission(camera.clone()).await;

    assert_eq!(status, PermissionStatus::Denied);
    assert_eq!(camera.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_gallery_permission_comes_from_picker() {
    let picker = Arc::new(FakePicker {
        status: PermissionStatus::Granted,
        outcome: Ok(PickOutcome::Cancelled),
        options: Mutex::new(Vec::new()),
    });

    let status = permissions::request_gallery_permission(picker.clone()).await;

    assert_eq!(status, PermissionStatus::Granted);
    assert!(picker.options.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_capture_uses_capture_quality() {
    let session = Arc::new(FakeSession {
        result: Ok(photo()),
        qualities: Mutex::new(Vec::new()),
    });

    let result = capture::capture(session.clone()).await;

    assert_eq!(result, Ok(photo()));
    assert_eq!(*session.qualities.lock().unwrap(), vec![CAPTURE_QUALITY]);
}

#[tokio::test]
async fn test_capture_result_applies_to_screen() {
    let session = Arc::new(FakeSession {
        result: Ok(photo()),
        qualities: Mutex::new(Vec::new()),
    });
    let mut screen = Screen::new(false);
    screen.camera_permission_resolved(PermissionStatus::Granted);
    screen.open_camera();
    assert!(screen.begin_capture(true));

    screen.capture_finished(capture::capture(session).await);

    assert_eq!(screen.captured(), Some(&photo()));
}

#[tokio::test]
async fn test_pick_passes_picker_options() {
    let picker = Arc::new(FakePicker {
        status: PermissionStatus::Granted,
        outcome: Ok(PickOutcome::Picked(vec![photo()])),
        options: Mutex::new(Vec::new()),
    });

    let outcome = gallery::pick(picker.clone()).await;

    assert_eq!(outcome, Ok(PickOutcome::Picked(vec![photo()])));
    let options = picker.options.lock().unwrap();
    assert_eq!(options.len(), 1);
    assert!(options[0].images_only);
    assert!(options[0].allows_editing);
    assert_eq!(options[0].quality, CAPTURE_QUALITY);
}

#[tokio::test]
async fn test_pick_without_permission_never_calls_picker() {
    let picker = Arc::new(FakePicker {
        status: PermissionStatus::Denied,
        outcome: Ok(PickOutcome::Picked(vec![photo()])),
        options: Mutex::new(Vec::new()),
    });
    let mut screen = Screen::new(false);
    screen.gallery_permission_resolved(
        permissions::request_gallery_permission(picker.clone()).await,
    );

    for _ in 0..3 {
        if screen.begin_pick() {
            screen.pick_finished(gallery::pick(picker.clone()).await);
        }
    }

    assert!(picker.options.lock().unwrap().is_empty());
    // Startup prompt plus one per attempt
    assert_eq!(screen.pending_prompts(), 4);
    assert!(screen.captured().is_none());
}

#[tokio::test]
async fn test_save_creates_asset_when_granted() {
    let library = FakeLibrary::new(PermissionStatus::Granted, Ok(asset()));

    let outcome = save::save(library.clone(), photo()).await;

    assert_eq!(outcome, SaveOutcome::Saved(asset()));
    assert_eq!(*library.created.lock().unwrap(), vec![photo()]);
}

#[tokio::test]
async fn test_save_denied_creates_nothing() {
    let library = FakeLibrary::new(PermissionStatus::Denied, Ok(asset()));

    let outcome = save::save(library.clone(), photo()).await;

    assert_eq!(outcome, SaveOutcome::PermissionDenied);
    assert!(library.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_requests_permission_every_time() {
    let library = FakeLibrary::new(
        PermissionStatus::Granted,
        Err(LibraryError::WriteFailed("disk full".into())),
    );

    let first = save::save(library.clone(), photo()).await;
    let second = save::save(library.clone(), photo()).await;

    assert_eq!(
        first,
        SaveOutcome::Failed(LibraryError::WriteFailed("disk full".into()))
    );
    assert_eq!(first, second);
    assert_eq!(library.permission_requests.load(Ordering::SeqCst), 2);
}

fn cached_photo(cache: &Path, name: &str) -> Locator {
    let path = cache.join(name);
    std::fs::write(&path, b"jpeg").unwrap();
    Locator::from_path(&path).unwrap()
}

fn cache_count(cache: &Path) -> usize {
    std::fs::read_dir(cache).unwrap().count()
}

/// Apply a screen transition, then release the image it dropped
fn transition(screen: &mut Screen, cache: &Path, change: impl FnOnce(&mut Screen)) {
    let previous = screen.captured().cloned();
    change(screen);
    release_image(previous, screen.captured(), cache);
}

fn picker_returning(locator: Locator) -> Arc<FakePicker> {
    Arc::new(FakePicker {
        status: PermissionStatus::Granted,
        outcome: Ok(PickOutcome::Picked(vec![locator])),
        options: Mutex::new(Vec::new()),
    })
}

fn ready_screen() -> Screen {
    let mut screen = Screen::new(false);
    screen.camera_permission_resolved(PermissionStatus::Granted);
    screen.gallery_permission_resolved(PermissionStatus::Granted);
    screen
}

#[tokio::test]
async fn test_saved_and_cleared_images_leave_the_cache() {
    let cache = tempfile::tempdir().unwrap();
    let mut screen = ready_screen();

    let session = Arc::new(FakeSession {
        result: Ok(cached_photo(cache.path(), "IMG_1.jpg")),
        qualities: Mutex::new(Vec::new()),
    });
    assert!(screen.open_camera());
    assert!(screen.begin_capture(true));
    let result = capture::capture(session).await;
    transition(&mut screen, cache.path(), |s| s.capture_finished(result));
    assert_eq!(cache_count(cache.path()), 1);

    let library = FakeLibrary::new(PermissionStatus::Granted, Ok(asset()));
    let locator = screen.begin_save().unwrap();
    let outcome = save::save(library, locator).await;
    transition(&mut screen, cache.path(), |s| s.save_finished(outcome));
    assert_eq!(cache_count(cache.path()), 0);

    let picker = picker_returning(cached_photo(cache.path(), "IMG_2.jpg"));
    assert!(screen.begin_pick());
    let result = gallery::pick(picker).await;
    transition(&mut screen, cache.path(), |s| s.pick_finished(result));
    assert_eq!(cache_count(cache.path()), 1);

    transition(&mut screen, cache.path(), Screen::clear_image);
    assert_eq!(cache_count(cache.path()), 0);
}

#[tokio::test]
async fn test_replaced_image_leaves_the_cache() {
    let cache = tempfile::tempdir().unwrap();
    let mut screen = ready_screen();

    for name in ["IMG_1.jpg", "IMG_2.jpg", "IMG_3.jpg"] {
        let picker = picker_returning(cached_photo(cache.path(), name));
        assert!(screen.begin_pick());
        let result = gallery::pick(picker).await;
        transition(&mut screen, cache.path(), |s| s.pick_finished(result));
    }

    assert_eq!(cache_count(cache.path()), 1);
    assert!(cache.path().join("IMG_3.jpg").exists());
}

#[tokio::test]
async fn test_failed_save_keeps_cached_image() {
    let cache = tempfile::tempdir().unwrap();
    let mut screen = ready_screen();

    let picker = picker_returning(cached_photo(cache.path(), "IMG_1.jpg"));
    assert!(screen.begin_pick());
    let result = gallery::pick(picker).await;
    transition(&mut screen, cache.path(), |s| s.pick_finished(result));

    let library = FakeLibrary::new(PermissionStatus::Denied, Ok(asset()));
    let locator = screen.begin_save().unwrap();
    let outcome = save::save(library, locator).await;
    transition(&mut screen, cache.path(), |s| s.save_finished(outcome));

    // Kept for a retry
    assert!(screen.captured().is_some());
    assert_eq!(cache_count(cache.path()), 1);
}
