// SPDX-License-Identifier: GPL-3.0-only

//! Opaque references to images owned by the host

use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

const FILE_SCHEME: &str = "file://";

/// Reference to an image resource on the local device
///
/// The screen only stores and compares locators. Host adapters produce them
/// and turn them back into paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    /// Wrap a locator string as returned by a host service
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Percent-encoded `file://` locator for a local path
    ///
    /// Relative paths are resolved against the working directory. Returns
    /// `None` only when the path has no absolute form (an empty path).
    pub fn from_path(path: &Path) -> Option<Self> {
        let absolute = std::path::absolute(path).ok()?;
        Url::from_file_path(absolute)
            .ok()
            .map(|url| Self(url.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local filesystem path, for `file://` locators and bare absolute paths
    pub fn to_path(&self) -> Option<PathBuf> {
        if let Some(rest) = self.0.strip_prefix(FILE_SCHEME) {
            if rest.is_empty() {
                return None;
            }
            return Url::parse(&self.0).ok()?.to_file_path().ok();
        }
        let path = Path::new(&self.0);
        path.is_absolute().then(|| path.to_path_buf())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
