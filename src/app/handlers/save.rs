// SPDX-License-Identifier: GPL-3.0-only

//! Save-to-gallery handler

use super::run_blocking;
use crate::app::screen::SaveOutcome;
use crate::app::state::{AppModel, Message};
use crate::backends::library::MediaLibrary;
use crate::errors::LibraryError;
use crate::locator::Locator;
use cosmic::Task;
use std::sync::Arc;
use tracing::info;

/// Ask for write access, then add the image to the gallery
///
/// Permission is requested on every save.
pub async fn save(library: Arc<dyn MediaLibrary>, locator: Locator) -> SaveOutcome {
    run_blocking(move || {
        if !library.request_write_permission().is_granted() {
            return SaveOutcome::PermissionDenied;
        }
        match library.create_asset(&locator) {
            Ok(asset) => SaveOutcome::Saved(asset),
            Err(e) => SaveOutcome::Failed(e),
        }
    })
    .await
    .unwrap_or_else(|e| SaveOutcome::Failed(LibraryError::WriteFailed(e)))
}

impl AppModel {
    pub(crate) fn handle_save_image(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(locator) = self.screen.begin_save() else {
            return Task::none();
        };

        info!(%locator, "Saving image to gallery");
        Task::perform(save(Arc::clone(&self.host.library), locator), |outcome| {
            cosmic::Action::App(Message::SaveFinished(outcome))
        })
    }

    pub(crate) fn handle_save_finished(
        &mut self,
        outcome: SaveOutcome,
    ) -> Task<cosmic::Action<Message>> {
        let previous = self.screen.captured().cloned();
        self.screen.save_finished(outcome);
        self.release_previous(previous);
        Task::none()
    }
}
