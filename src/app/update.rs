// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, while specific handlers
//! are implemented in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::permissions`: Camera and gallery permission requests
//! - `handlers::camera`: Camera mode, facing, preview frames
//! - `handlers::capture`: Still capture
//! - `handlers::gallery`: Image picker
//! - `handlers::save`: Save to gallery
//! - `handlers::system`: Prompts, links, settings

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::DismissPrompt => self.handle_dismiss_prompt(),

            // ===== Permissions =====
            Message::CameraPermission(status) => self.handle_camera_permission(status),
            Message::GalleryPermission(status) => self.handle_gallery_permission(status),
            Message::RetryCameraPermission => self.handle_retry_camera_permission(),

            // ===== Camera =====
            Message::OpenCamera => self.handle_open_camera(),
            Message::CloseCamera => self.handle_close_camera(),
            Message::ToggleFacing => self.handle_toggle_facing(),
            Message::SessionStarted(facing, handle) => self.handle_session_started(facing, handle),
            Message::SessionFailed(error) => self.handle_session_failed(error),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),

            // ===== Capture / Gallery / Save =====
            Message::Capture => self.handle_capture(),
            Message::CaptureFinished(result) => self.handle_capture_finished(result),
            Message::PickImage => self.handle_pick_image(),
            Message::PickFinished(result) => self.handle_pick_finished(result),
            Message::SaveImage => self.handle_save_image(),
            Message::SaveFinished(outcome) => self.handle_save_finished(outcome),
            Message::ClearImage => self.handle_clear_image(),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::SetClearAfterFailedSave(enabled) => {
                self.handle_set_clear_after_failed_save(enabled)
            }
            Message::OpenGalleryFolder => self.handle_open_gallery_folder(),
        }
    }
}
