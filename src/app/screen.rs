// SPDX-License-Identifier: GPL-3.0-only

//! View state of the capture screen and its transitions
//!
//! `Screen` owns everything the view shows: permission answers, the camera
//! facing, the captured image and the UI mode. It never calls a host service.
//! Handlers start the host call after a `begin_*` transition agrees, then feed
//! the outcome back through the matching `*_finished` transition.

use super::prompt::Prompt;
use crate::backends::types::{Asset, Facing, PermissionStatus, PickOutcome};
use crate::errors::{CameraError, LibraryError, PickerError};
use crate::locator::Locator;
use std::collections::VecDeque;
use tracing::{debug, error, info, warn};

/// Which surface the screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Default,
    Camera,
}

/// A host call that is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Capture,
    Pick,
    Save,
}

/// Result of the save flow: permission request followed by asset creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    PermissionDenied,
    Saved(Asset),
    Failed(LibraryError),
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    camera_permission: PermissionStatus,
    gallery_permission: PermissionStatus,
    facing: Facing,
    captured: Option<Locator>,
    mode: UiMode,
    prompts: VecDeque<Prompt>,
    busy: Option<Operation>,
    clear_after_failed_save: bool,
}

impl Screen {
    pub fn new(clear_after_failed_save: bool) -> Self {
        Self {
            clear_after_failed_save,
            ..Self::default()
        }
    }

    pub fn camera_permission(&self) -> PermissionStatus {
        self.camera_permission
    }

    pub fn gallery_permission(&self) -> PermissionStatus {
        self.gallery_permission
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn captured(&self) -> Option<&Locator> {
        self.captured.as_ref()
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn busy(&self) -> Option<Operation> {
        self.busy
    }

    /// The prompt currently shown, if any
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompts.front()
    }

    pub fn pending_prompts(&self) -> usize {
        self.prompts.len()
    }

    pub fn set_clear_after_failed_save(&mut self, enabled: bool) {
        self.clear_after_failed_save = enabled;
    }

    // ===== Permissions =====

    pub fn camera_permission_resolved(&mut self, status: PermissionStatus) {
        info!(?status, "Camera permission resolved");
        self.camera_permission = status;
        if !status.is_granted() && self.mode == UiMode::Camera {
            self.mode = UiMode::Default;
        }
    }

    /// Forget the previous camera answer while a new request is pending
    pub fn retry_camera_permission(&mut self) {
        self.camera_permission = PermissionStatus::Unknown;
    }

    pub fn gallery_permission_resolved(&mut self, status: PermissionStatus) {
        info!(?status, "Gallery read permission resolved");
        self.gallery_permission = status;
        if !status.is_granted() {
            self.push_prompt(Prompt::gallery_permission_required());
        }
    }

    // ===== Camera mode =====

    /// Enter camera mode; returns false when camera access is not granted
    pub fn open_camera(&mut self) -> bool {
        if !self.camera_permission.is_granted() {
            warn!(status = ?self.camera_permission, "Camera mode requires permission");
            return false;
        }
        self.mode = UiMode::Camera;
        true
    }

    pub fn close_camera(&mut self) {
        self.mode = UiMode::Default;
    }

    /// Flip between the front and back camera
    pub fn toggle_facing(&mut self) {
        self.facing = self.facing.toggled();
        debug!(facing = %self.facing, "Camera facing toggled");
    }

    /// The camera session could not be started
    pub fn camera_failed(&mut self) {
        self.mode = UiMode::Default;
        self.push_prompt(Prompt::camera_unavailable());
    }

    // ===== Capture =====

    /// Start a capture from a running session in camera mode
    ///
    /// `has_session` is false while the camera is still starting; the request
    /// is then ignored without a prompt.
    pub fn begin_capture(&mut self, has_session: bool) -> bool {
        if self.mode != UiMode::Camera || self.busy.is_some() {
            return false;
        }
        if !has_session {
            info!("No camera session available to capture");
            return false;
        }
        self.busy = Some(Operation::Capture);
        true
    }

    pub fn capture_finished(&mut self, result: Result<Locator, CameraError>) {
        self.finish(Operation::Capture);
        match result {
            Ok(locator) => {
                info!(%locator, "Photo captured");
                self.captured = Some(locator);
                self.mode = UiMode::Default;
            }
            Err(e) => {
                error!(error = %e, "Failed to take picture");
                self.push_prompt(Prompt::capture_failed());
            }
        }
    }

    // ===== Gallery pick =====

    /// Gate a pick on gallery read access
    ///
    /// Without access the denial prompt is queued and no picker may be shown.
    pub fn begin_pick(&mut self) -> bool {
        if !self.gallery_permission.is_granted() {
            self.push_prompt(Prompt::gallery_read_denied());
            return false;
        }
        if self.busy.is_some() {
            return false;
        }
        self.busy = Some(Operation::Pick);
        true
    }

    pub fn pick_finished(&mut self, result: Result<PickOutcome, PickerError>) {
        self.finish(Operation::Pick);
        match result {
            Ok(outcome) => match outcome.first() {
                Some(locator) => {
                    info!(%locator, "Image picked");
                    self.captured = Some(locator.clone());
                }
                None => debug!("Pick cancelled"),
            },
            Err(e) => {
                error!(error = %e, "Failed to pick image");
                self.push_prompt(Prompt::picker_failed());
            }
        }
    }

    // ===== Save =====

    /// Locator to save, when an image is held and nothing else is running
    pub fn begin_save(&mut self) -> Option<Locator> {
        if self.busy.is_some() {
            return None;
        }
        let locator = self.captured.clone()?;
        self.busy = Some(Operation::Save);
        Some(locator)
    }

    pub fn save_finished(&mut self, outcome: SaveOutcome) {
        self.finish(Operation::Save);
        match outcome {
            SaveOutcome::Saved(asset) => {
                info!(id = %asset.id, "Image saved to gallery");
                self.push_prompt(Prompt::save_succeeded());
                self.captured = None;
            }
            SaveOutcome::PermissionDenied => {
                self.push_prompt(Prompt::save_permission_denied());
                self.clear_after_failure();
            }
            SaveOutcome::Failed(e) => {
                error!(error = %e, "Failed to save image");
                self.push_prompt(Prompt::save_failed());
                self.clear_after_failure();
            }
        }
    }

    // ===== Misc =====

    pub fn clear_image(&mut self) {
        self.captured = None;
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompts.pop_front();
    }

    fn push_prompt(&mut self, prompt: Prompt) {
        debug!(title = %prompt.title, body = %prompt.body, "Prompt queued");
        self.prompts.push_back(prompt);
    }

    fn finish(&mut self, operation: Operation) {
        if self.busy == Some(operation) {
            self.busy = None;
        }
    }

    fn clear_after_failure(&mut self) {
        if self.clear_after_failed_save {
            self.captured = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> Locator {
        Locator::new("file:///tmp/photo123.jpg")
    }

    fn granted_screen() -> Screen {
        let mut screen = Screen::new(false);
        screen.camera_permission_resolved(PermissionStatus::Granted);
        screen.gallery_permission_resolved(PermissionStatus::Granted);
        screen
    }

    #[test]
    fn test_initial_state() {
        let screen = Screen::new(false);
        assert_eq!(screen.camera_permission(), PermissionStatus::Unknown);
        assert_eq!(screen.facing(), Facing::Back);
        assert_eq!(screen.mode(), UiMode::Default);
        assert!(screen.captured().is_none());
        assert!(screen.prompt().is_none());
    }

    #[test]
    fn test_open_camera_requires_permission() {
        let mut screen = Screen::new(false);
        assert!(!screen.open_camera());
        assert_eq!(screen.mode(), UiMode::Default);

        screen.camera_permission_resolved(PermissionStatus::Granted);
        assert!(screen.open_camera());
        assert_eq!(screen.mode(), UiMode::Camera);
    }

    #[test]
    fn test_capture_failure_keeps_camera_mode() {
        let mut screen = granted_screen();
        screen.open_camera();
        assert!(screen.begin_capture(true));
        assert!(!screen.begin_capture(true));

        screen.capture_finished(Err(CameraError::NoFrameAvailable));
        assert_eq!(screen.mode(), UiMode::Camera);
        assert!(screen.captured().is_none());
        assert_eq!(screen.prompt(), Some(&Prompt::capture_failed()));
        assert!(screen.busy().is_none());
    }

    #[test]
    fn test_capture_outside_camera_mode_is_refused() {
        let mut screen = granted_screen();
        assert!(!screen.begin_capture(true));
        assert!(screen.busy().is_none());
    }

    #[test]
    fn test_capture_without_session_is_ignored() {
        let mut screen = granted_screen();
        screen.open_camera();

        assert!(!screen.begin_capture(false));
        assert!(screen.busy().is_none());
        assert!(screen.prompt().is_none());
        assert_eq!(screen.mode(), UiMode::Camera);

        assert!(screen.begin_capture(true));
    }

    #[test]
    fn test_pick_cancel_keeps_previous_image() {
        let mut screen = granted_screen();
        screen.capture_finished(Ok(photo()));

        assert!(screen.begin_pick());
        screen.pick_finished(Ok(PickOutcome::Cancelled));
        assert_eq!(screen.captured(), Some(&photo()));
    }

    #[test]
    fn test_pick_uses_first_asset() {
        let mut screen = granted_screen();
        assert!(screen.begin_pick());
        screen.pick_finished(Ok(PickOutcome::Picked(vec![
            Locator::new("file:///a.jpg"),
            Locator::new("file:///b.jpg"),
        ])));
        assert_eq!(screen.captured(), Some(&Locator::new("file:///a.jpg")));
    }

    #[test]
    fn test_pick_failure_prompts() {
        let mut screen = granted_screen();
        assert!(screen.begin_pick());
        screen.pick_finished(Err(PickerError::DialogFailed("no portal".into())));
        assert_eq!(screen.prompt(), Some(&Prompt::picker_failed()));
        assert!(screen.captured().is_none());
    }

    #[test]
    fn test_save_requires_image() {
        let mut screen = granted_screen();
        assert!(screen.begin_save().is_none());
        assert!(screen.busy().is_none());
    }

    #[test]
    fn test_failed_save_retains_image_by_default() {
        let mut screen = granted_screen();
        screen.capture_finished(Ok(photo()));
        screen.begin_save();
        screen.save_finished(SaveOutcome::Failed(LibraryError::WriteFailed("disk".into())));

        assert_eq!(screen.captured(), Some(&photo()));
        assert_eq!(screen.prompt(), Some(&Prompt::save_failed()));
    }

    #[test]
    fn test_failed_save_clears_when_configured() {
        let mut screen = granted_screen();
        screen.set_clear_after_failed_save(true);
        screen.capture_finished(Ok(photo()));
        screen.begin_save();
        screen.save_finished(SaveOutcome::Failed(LibraryError::WriteFailed("disk".into())));
        assert!(screen.captured().is_none());
    }

    #[test]
    fn test_prompts_are_fifo() {
        let mut screen = Screen::new(false);
        screen.gallery_permission_resolved(PermissionStatus::Denied);
        screen.begin_pick();

        assert_eq!(screen.pending_prompts(), 2);
        assert_eq!(screen.prompt(), Some(&Prompt::gallery_permission_required()));
        screen.dismiss_prompt();
        assert_eq!(screen.prompt(), Some(&Prompt::gallery_read_denied()));
        screen.dismiss_prompt();
        assert!(screen.prompt().is_none());
    }

    #[test]
    fn test_camera_failure_leaves_camera_mode() {
        let mut screen = granted_screen();
        screen.open_camera();
        screen.camera_failed();
        assert_eq!(screen.mode(), UiMode::Default);
        assert_eq!(screen.prompt(), Some(&Prompt::camera_unavailable()));
    }

    #[test]
    fn test_retry_resets_camera_permission() {
        let mut screen = Screen::new(false);
        screen.camera_permission_resolved(PermissionStatus::Denied);
        screen.retry_camera_permission();
        assert_eq!(screen.camera_permission(), PermissionStatus::Unknown);
    }
}
