// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture handler

use super::run_blocking;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::CameraSession;
use crate::constants::CAPTURE_QUALITY;
use crate::errors::CameraError;
use crate::locator::Locator;
use cosmic::Task;
use std::sync::Arc;
use tracing::info;

/// Take one still from a running session
pub async fn capture(session: Arc<dyn CameraSession>) -> Result<Locator, CameraError> {
    run_blocking(move || session.capture_still(CAPTURE_QUALITY))
        .await
        .unwrap_or_else(|e| Err(CameraError::EncodingFailed(e)))
}

impl AppModel {
    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        let session = self.session.as_ref().map(|handle| Arc::clone(&handle.0));
        if !self.screen.begin_capture(session.is_some()) {
            return Task::none();
        }
        let Some(session) = session else {
            return Task::none();
        };

        info!("Capturing photo...");
        Task::perform(capture(session), |result| {
            cosmic::Action::App(Message::CaptureFinished(result))
        })
    }

    pub(crate) fn handle_capture_finished(
        &mut self,
        result: Result<Locator, CameraError>,
    ) -> Task<cosmic::Action<Message>> {
        let captured = result.is_ok();
        let previous = self.screen.captured().cloned();
        self.screen.capture_finished(result);
        self.release_previous(previous);
        if captured {
            self.stop_camera();
        }
        Task::none()
    }
}
