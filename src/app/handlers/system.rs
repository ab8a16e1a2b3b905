// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles prompts, context drawer pages, external links and settings.

use crate::app::state::{AppModel, ContextPage, Message};
use crate::backends::DesktopLibrary;
use crate::config::{AppTheme, Config};
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use std::sync::Arc;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(%url, %err, "Failed to open url");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_dismiss_prompt(&mut self) -> Task<cosmic::Action<Message>> {
        self.screen.dismiss_prompt();
        Task::none()
    }

    pub(crate) fn handle_clear_image(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Clearing captured image");
        let previous = self.screen.captured().cloned();
        self.screen.clear_image();
        self.release_previous(previous);
        Task::none()
    }

    pub(crate) fn handle_open_gallery_folder(&self) -> Task<cosmic::Action<Message>> {
        let dir = crate::storage::gallery_directory(self.config.gallery_folder());
        if let Err(e) = crate::storage::ensure_directory(&dir) {
            error!(error = %e, path = %dir.display(), "Failed to create gallery folder");
            return Task::none();
        }
        info!(path = %dir.display(), "Opening gallery folder");
        if let Err(e) = open::that_detached(&dir) {
            error!(error = %e, path = %dir.display(), "Failed to open gallery folder");
        }
        Task::none()
    }

    // =========================================================================
    // Settings Handlers
    // =========================================================================

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let theme_changed = config.app_theme != self.config.app_theme;
        let folder_changed = config.gallery_folder() != self.config.gallery_folder();

        self.screen
            .set_clear_after_failed_save(config.clear_after_failed_save);
        self.config = config;

        if folder_changed {
            let dir = crate::storage::gallery_directory(self.config.gallery_folder());
            info!(path = %dir.display(), "Gallery folder changed");
            self.host.library = Arc::new(DesktopLibrary::new(dir));
        }
        if theme_changed {
            return cosmic::command::set_theme(self.config.app_theme.theme());
        }
        Task::none()
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(app_theme) = AppTheme::ALL.get(index).copied() else {
            return Task::none();
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.write_config("app theme");

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_set_clear_after_failed_save(
        &mut self,
        enabled: bool,
    ) -> Task<cosmic::Action<Message>> {
        info!(enabled, "Setting clear-after-failed-save");
        self.config.clear_after_failed_save = enabled;
        self.screen.set_clear_after_failed_save(enabled);
        self.write_config("clear-after-failed-save");
        Task::none()
    }

    fn write_config(&self, setting: &str) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, setting, "Failed to save setting");
        }
    }
}
