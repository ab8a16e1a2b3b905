// SPDX-License-Identifier: GPL-3.0-only

//! Screen behavior: capture, pick, save and clear sequences

use snapshot::app::prompt::Prompt;
use snapshot::app::render::{Surface, render};
use snapshot::app::screen::{SaveOutcome, Screen, UiMode};
use snapshot::backends::{Asset, Facing, PermissionStatus, PickOutcome};
use snapshot::errors::{CameraError, LibraryError, PickerError};
use snapshot::locator::Locator;

fn photo() -> Locator {
    Locator::new("file:///tmp/photo123.jpg")
}

fn ready_screen(clear_after_failed_save: bool) -> Screen {
    let mut screen = Screen::new(clear_after_failed_save);
    screen.camera_permission_resolved(PermissionStatus::Granted);
    screen.gallery_permission_resolved(PermissionStatus::Granted);
    screen
}

fn capture(screen: &mut Screen, result: Result<Locator, CameraError>) {
    assert!(screen.open_camera());
    assert!(screen.begin_capture(true));
    screen.capture_finished(result);
}

fn pick(screen: &mut Screen, result: Result<PickOutcome, PickerError>) {
    assert!(screen.begin_pick());
    screen.pick_finished(result);
}

fn save(screen: &mut Screen, outcome: SaveOutcome) {
    assert!(screen.begin_save().is_some());
    screen.save_finished(outcome);
}

#[test]
fn test_captured_image_is_most_recent_success() {
    let mut screen = ready_screen(false);
    let a = Locator::new("file:///tmp/a.jpg");
    let b = Locator::new("file:///tmp/b.jpg");

    capture(&mut screen, Ok(a.clone()));
    assert_eq!(screen.captured(), Some(&a));

    pick(&mut screen, Ok(PickOutcome::Picked(vec![b.clone()])));
    assert_eq!(screen.captured(), Some(&b));

    // Failures and cancels leave the last success in place
    pick(&mut screen, Err(PickerError::DialogFailed("gone".into())));
    pick(&mut screen, Ok(PickOutcome::Cancelled));
    capture(&mut screen, Err(CameraError::NoFrameAvailable));
    screen.close_camera();
    assert_eq!(screen.captured(), Some(&b));

    capture(&mut screen, Ok(a.clone()));
    assert_eq!(screen.captured(), Some(&a));
}

#[test]
fn test_no_success_means_no_image() {
    let mut screen = ready_screen(false);
    capture(&mut screen, Err(CameraError::NoFrameAvailable));
    screen.close_camera();
    pick(&mut screen, Ok(PickOutcome::Cancelled));
    assert!(screen.captured().is_none());
}

#[test]
fn test_clear_removes_preview_and_image_actions() {
    let mut screen = ready_screen(false);
    capture(&mut screen, Ok(photo()));
    assert!(render(&screen).surface.shows_image_actions());

    screen.clear_image();

    assert!(screen.captured().is_none());
    assert_eq!(
        render(&screen).surface,
        Surface::Home {
            preview: None,
            picking: false,
            saving: false
        }
    );
}

#[test]
fn test_toggle_facing_twice_restores_facing() {
    let mut screen = ready_screen(false);
    let original = screen.facing();
    screen.toggle_facing();
    assert_ne!(screen.facing(), original);
    screen.toggle_facing();
    assert_eq!(screen.facing(), original);
}

#[test]
fn test_gallery_denied_at_startup_blocks_pick() {
    let mut screen = Screen::new(false);
    screen.camera_permission_resolved(PermissionStatus::Granted);
    screen.gallery_permission_resolved(PermissionStatus::Denied);
    assert_eq!(screen.prompt(), Some(&Prompt::gallery_permission_required()));
    screen.dismiss_prompt();

    assert!(!screen.begin_pick());

    let prompt = screen.prompt().expect("denial prompt");
    assert_eq!(prompt.title, "Error");
    assert_eq!(prompt.body, "No tienes permiso para acceder a la galería");
    assert!(screen.captured().is_none());
    assert!(screen.busy().is_none());
}

#[test]
fn test_capture_success_returns_to_default_mode() {
    let mut screen = ready_screen(false);
    capture(&mut screen, Ok(photo()));

    assert_eq!(screen.mode(), UiMode::Default);
    match render(&screen).surface {
        Surface::Home { preview, .. } => assert_eq!(preview, Some(photo())),
        other => panic!("unexpected surface {:?}", other),
    }
}

#[test]
fn test_save_success_confirms_and_clears() {
    let mut screen = ready_screen(false);
    capture(&mut screen, Ok(photo()));

    save(
        &mut screen,
        SaveOutcome::Saved(Asset {
            id: "42".to_string(),
            locator: Locator::new("file:///home/user/Pictures/Snapshot/IMG_1.jpg"),
        }),
    );

    let prompt = screen.prompt().expect("confirmation prompt");
    assert_eq!(prompt.title, "Listo");
    assert_eq!(prompt.body, "Imagen guardada en la galería.");
    assert!(screen.captured().is_none());
}

#[test]
fn test_save_denied_keeps_image_by_default() {
    let mut screen = ready_screen(false);
    capture(&mut screen, Ok(photo()));

    save(&mut screen, SaveOutcome::PermissionDenied);

    let prompt = screen.prompt().expect("denial prompt");
    assert_eq!(prompt.title, "Permiso denegado");
    assert_eq!(
        prompt.body,
        "No se concedió permiso para guardar en la galería."
    );
    assert_eq!(screen.captured(), Some(&photo()));
}

#[test]
fn test_save_denied_clears_when_configured() {
    let mut screen = ready_screen(true);
    capture(&mut screen, Ok(photo()));

    save(&mut screen, SaveOutcome::PermissionDenied);

    assert_eq!(screen.prompt(), Some(&Prompt::save_permission_denied()));
    assert!(screen.captured().is_none());
}

#[test]
fn test_save_failure_prompts_error() {
    let mut screen = ready_screen(false);
    pick(&mut screen, Ok(PickOutcome::Picked(vec![photo()])));

    save(
        &mut screen,
        SaveOutcome::Failed(LibraryError::WriteFailed("read-only".into())),
    );

    let prompt = screen.prompt().expect("error prompt");
    assert_eq!(prompt.title, "Error");
    assert_eq!(prompt.body, "No se pudo guardar la imagen.");
}

#[test]
fn test_busy_operation_blocks_other_actions() {
    let mut screen = ready_screen(false);
    capture(&mut screen, Ok(photo()));

    assert!(screen.begin_save().is_some());
    assert!(!screen.begin_pick());
    assert!(screen.begin_save().is_none());

    screen.save_finished(SaveOutcome::PermissionDenied);
    assert!(screen.begin_pick());
}

#[test]
fn test_camera_denied_renders_retry() {
    let mut screen = Screen::new(false);
    screen.camera_permission_resolved(PermissionStatus::Denied);
    assert_eq!(render(&screen).surface, Surface::CameraPermissionDenied);
    assert!(!screen.open_camera());

    screen.retry_camera_permission();
    assert_eq!(render(&screen).surface, Surface::RequestingPermission);

    screen.camera_permission_resolved(PermissionStatus::Granted);
    screen.toggle_facing();
    assert!(screen.open_camera());
    assert_eq!(
        render(&screen).surface,
        Surface::Camera {
            facing: Facing::Front,
            capturing: false
        }
    );
}

#[test]
fn test_capture_before_session_starts_is_ignored() {
    let mut screen = ready_screen(false);
    assert!(screen.open_camera());

    assert!(!screen.begin_capture(false));

    assert!(screen.busy().is_none());
    assert!(screen.prompt().is_none());
    assert!(screen.captured().is_none());
    assert_eq!(
        render(&screen).surface,
        Surface::Camera {
            facing: Facing::Back,
            capturing: false
        }
    );
}
