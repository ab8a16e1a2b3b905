// SPDX-License-Identifier: GPL-3.0-only

//! Gallery image picker over the native file chooser

use crate::backends::types::{PermissionStatus, PickOutcome, PickerOptions};
use crate::constants::IMAGE_EXTENSIONS;
use crate::errors::PickerError;
use crate::fl;
use crate::locator::Locator;
use crate::{media, storage};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Image picking capability of the host
pub trait ImagePicker: Send + Sync {
    /// Ask for access to the user's images
    fn request_read_permission(&self) -> PermissionStatus;

    /// Let the user choose an image; blocks until the picker closes
    fn pick_image(&self, options: &PickerOptions) -> Result<PickOutcome, PickerError>;
}

/// Picker showing the desktop file chooser in the Pictures directory
///
/// The chosen image is re-encoded to JPEG in `output_dir`; the returned
/// locator names that copy, never the user's original.
pub struct DesktopPicker {
    start_dir: PathBuf,
    output_dir: PathBuf,
}

impl DesktopPicker {
    pub fn new(start_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            start_dir,
            output_dir,
        }
    }

    /// Re-encode a chosen file into the output directory
    pub fn import(&self, source: &Path, options: &PickerOptions) -> Result<Locator, PickerError> {
        if !source.is_file() {
            return Err(PickerError::Unreadable(source.display().to_string()));
        }
        let copy = media::recompress_file(source, &self.output_dir, options.quality)
            .map_err(PickerError::EncodingFailed)?;
        info!(source = %source.display(), copy = %copy.display(), "Picked image imported");
        Locator::from_path(&copy)
            .ok_or_else(|| PickerError::EncodingFailed(copy.display().to_string()))
    }
}

impl ImagePicker for DesktopPicker {
    fn request_read_permission(&self) -> PermissionStatus {
        let readable = storage::is_readable_dir(&self.start_dir)
            || dirs::home_dir().is_some_and(|home| storage::is_readable_dir(&home));
        debug!(dir = %self.start_dir.display(), readable, "Gallery read access checked");
        PermissionStatus::from_granted(readable)
    }

    fn pick_image(&self, options: &PickerOptions) -> Result<PickOutcome, PickerError> {
        if options.allows_editing {
            debug!("File chooser has no editing step; image is returned as selected");
        }

        let mut dialog = rfd::FileDialog::new()
            .set_title(fl!("open-gallery"))
            .set_directory(&self.start_dir);
        if options.images_only {
            dialog = dialog.add_filter(fl!("image-files"), IMAGE_EXTENSIONS);
        }

        let Some(source) = dialog.pick_file() else {
            info!("Image picker cancelled");
            return Ok(PickOutcome::Cancelled);
        };

        let locator = self.import(&source, options)?;
        Ok(PickOutcome::Picked(vec![locator]))
    }
}
