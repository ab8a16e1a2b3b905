// SPDX-License-Identifier: GPL-3.0-only

//! Gallery pick handler

use super::run_blocking;
use crate::app::state::{AppModel, Message};
use crate::backends::picker::ImagePicker;
use crate::backends::types::{PickOutcome, PickerOptions};
use crate::errors::PickerError;
use cosmic::Task;
use std::sync::Arc;
use tracing::info;

/// Show the picker for a single image, editing allowed, at capture quality
pub async fn pick(picker: Arc<dyn ImagePicker>) -> Result<PickOutcome, PickerError> {
    let options = PickerOptions::default();
    run_blocking(move || picker.pick_image(&options))
        .await
        .unwrap_or_else(|e| Err(PickerError::DialogFailed(e)))
}

impl AppModel {
    pub(crate) fn handle_pick_image(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.screen.begin_pick() {
            return Task::none();
        }

        info!("Opening image picker");
        Task::perform(pick(Arc::clone(&self.host.picker)), |result| {
            cosmic::Action::App(Message::PickFinished(result))
        })
    }

    pub(crate) fn handle_pick_finished(
        &mut self,
        result: Result<PickOutcome, PickerError>,
    ) -> Task<cosmic::Action<Message>> {
        let previous = self.screen.captured().cloned();
        self.screen.pick_finished(result);
        self.release_previous(previous);
        Task::none()
    }
}
