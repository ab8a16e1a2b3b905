// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::DEFAULT_GALLERY_FOLDER;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    /// Variants in settings dropdown order
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }

    /// Position in [`AppTheme::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::System => 0,
            Self::Dark => 1,
            Self::Light => 2,
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Sub-folder of the Pictures directory that saved images go to
    pub gallery_folder: String,
    /// Discard the captured image even when saving it failed
    pub clear_after_failed_save: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            gallery_folder: DEFAULT_GALLERY_FOLDER.to_string(),
            clear_after_failed_save: false,
        }
    }
}

impl Config {
    /// Load the persisted configuration for `app_id`
    ///
    /// Falls back to defaults when the config store is unavailable; entries
    /// that fail to parse keep their default value.
    pub fn load(app_id: &str) -> (Option<cosmic_config::Config>, Self) {
        match cosmic_config::Config::new(app_id, Self::VERSION) {
            Ok(handler) => {
                let config = match Self::get_entry(&handler) {
                    Ok(config) => config,
                    Err((errors, config)) => {
                        error!(?errors, "Errors loading config");
                        config
                    }
                };
                (Some(handler), config)
            }
            Err(err) => {
                error!(%err, "Failed to create config handler");
                (None, Self::default())
            }
        }
    }

    /// Gallery folder name, falling back to the default when blank
    pub fn gallery_folder(&self) -> &str {
        let folder = self.gallery_folder.trim();
        if folder.is_empty() {
            DEFAULT_GALLERY_FOLDER
        } else {
            folder
        }
    }
}
