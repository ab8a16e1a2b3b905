// SPDX-License-Identifier: GPL-3.0-only

//! Permission acquisition handlers

use super::run_blocking;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::CameraService;
use crate::backends::picker::ImagePicker;
use crate::backends::types::PermissionStatus;
use cosmic::Task;
use std::sync::Arc;
use tracing::{info, warn};

/// Ask the camera service for access
pub async fn request_camera_permission(camera: Arc<dyn CameraService>) -> PermissionStatus {
    run_blocking(move || camera.request_permission())
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Camera permission request failed");
            PermissionStatus::Denied
        })
}

/// Ask the picker for gallery read access
pub async fn request_gallery_permission(picker: Arc<dyn ImagePicker>) -> PermissionStatus {
    run_blocking(move || picker.request_read_permission())
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Gallery permission request failed");
            PermissionStatus::Denied
        })
}

impl AppModel {
    /// Startup requests: gallery read first, then the camera
    pub(crate) fn request_startup_permissions(&self) -> Task<cosmic::Action<Message>> {
        info!("Requesting startup permissions");
        let picker = Arc::clone(&self.host.picker);
        let gallery = Task::perform(request_gallery_permission(picker), |status| {
            cosmic::Action::App(Message::GalleryPermission(status))
        });
        Task::batch([gallery, self.camera_permission_task()])
    }

    fn camera_permission_task(&self) -> Task<cosmic::Action<Message>> {
        let camera = Arc::clone(&self.host.camera);
        Task::perform(request_camera_permission(camera), |status| {
            cosmic::Action::App(Message::CameraPermission(status))
        })
    }

    pub(crate) fn handle_camera_permission(
        &mut self,
        status: PermissionStatus,
    ) -> Task<cosmic::Action<Message>> {
        self.screen.camera_permission_resolved(status);
        if !status.is_granted() {
            self.stop_camera();
        }
        Task::none()
    }

    pub(crate) fn handle_gallery_permission(
        &mut self,
        status: PermissionStatus,
    ) -> Task<cosmic::Action<Message>> {
        self.screen.gallery_permission_resolved(status);
        Task::none()
    }

    pub(crate) fn handle_retry_camera_permission(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Retrying camera permission request");
        self.screen.retry_camera_permission();
        self.camera_permission_task()
    }
}
