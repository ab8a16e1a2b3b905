// SPDX-License-Identifier: GPL-3.0-only

//! Media library backed by a folder of the user's Pictures directory

use crate::backends::types::{Asset, PermissionStatus};
use crate::errors::LibraryError;
use crate::locator::Locator;
use crate::storage;
use std::path::PathBuf;
use tracing::{info, warn};

/// Gallery write capability of the host
pub trait MediaLibrary: Send + Sync {
    /// Ask for permission to add images to the gallery
    fn request_write_permission(&self) -> PermissionStatus;

    /// Add the image at `locator` to the gallery
    fn create_asset(&self, locator: &Locator) -> Result<Asset, LibraryError>;
}

pub struct DesktopLibrary {
    gallery_dir: PathBuf,
}

impl DesktopLibrary {
    pub fn new(gallery_dir: PathBuf) -> Self {
        Self { gallery_dir }
    }

    pub fn gallery_dir(&self) -> &std::path::Path {
        &self.gallery_dir
    }
}

impl MediaLibrary for DesktopLibrary {
    fn request_write_permission(&self) -> PermissionStatus {
        let granted = match storage::ensure_directory(&self.gallery_dir) {
            Ok(dir) => storage::is_writable_dir(&dir),
            Err(e) => {
                warn!(path = %self.gallery_dir.display(), error = %e, "Cannot create gallery folder");
                false
            }
        };
        PermissionStatus::from_granted(granted)
    }

    fn create_asset(&self, locator: &Locator) -> Result<Asset, LibraryError> {
        let source = locator
            .to_path()
            .filter(|path| path.is_file())
            .ok_or_else(|| LibraryError::MissingSource(locator.to_string()))?;

        let stored = storage::copy_into(&source, &self.gallery_dir)
            .map_err(|e| LibraryError::WriteFailed(e.to_string()))?;

        let locator = Locator::from_path(&stored)
            .ok_or_else(|| LibraryError::WriteFailed(stored.display().to_string()))?;
        let asset = Asset {
            id: uuid::Uuid::new_v4().to_string(),
            locator,
        };
        info!(id = %asset.id, path = %stored.display(), "Asset created");
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_asset_copies_into_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo123.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        let library = DesktopLibrary::new(dir.path().join("Pictures").join("Snapshot"));
        assert_eq!(library.request_write_permission(), PermissionStatus::Granted);

        let asset = library.create_asset(&Locator::from_path(&source).unwrap()).unwrap();
        let stored = asset.locator.to_path().unwrap();
        assert!(stored.starts_with(library.gallery_dir()));
        assert_eq!(std::fs::read(stored).unwrap(), b"jpeg");
        assert!(!asset.id.is_empty());
    }

    #[test]
    fn test_create_asset_from_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let source = dir
            .path()
            .join(std::ffi::OsStr::from_bytes(b"foto\xff.jpg"));
        std::fs::write(&source, b"jpeg").unwrap();

        let library = DesktopLibrary::new(dir.path().join("gallery"));
        let asset = library
            .create_asset(&Locator::from_path(&source).unwrap())
            .unwrap();

        assert_eq!(std::fs::read(asset.locator.to_path().unwrap()).unwrap(), b"jpeg");
    }

    #[test]
    fn test_create_asset_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let library = DesktopLibrary::new(dir.path().to_path_buf());
        let result = library.create_asset(&Locator::new("file:///nonexistent/photo.jpg"));
        assert!(matches!(result, Err(LibraryError::MissingSource(_))));
    }
}
