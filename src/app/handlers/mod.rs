// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Each module pairs an `AppModel` handler, which asks the screen whether the
//! action may start and spawns the host call, with a free async function that
//! performs the call. The async functions only touch the host services, so
//! they can be driven directly with fake services.

pub mod camera;
pub mod capture;
pub mod gallery;
pub mod permissions;
pub mod save;
pub mod system;

use crate::app::state::AppModel;
use crate::locator::Locator;
use crate::storage;
use std::path::Path;

/// Run a blocking host call on the blocking thread pool
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, String>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| format!("Task join error: {}", e))
}

/// Delete the cached file of an image the screen stopped holding
///
/// `previous` is the image held before a transition and `current` the one
/// held after it. Nothing is removed when they are the same image.
pub fn release_image(previous: Option<Locator>, current: Option<&Locator>, cache_dir: &Path) {
    if let Some(previous) = previous
        && current != Some(&previous)
    {
        storage::discard_cached(&previous, cache_dir);
    }
}

impl AppModel {
    /// Release `previous` if the last screen transition dropped or replaced it
    pub(crate) fn release_previous(&self, previous: Option<Locator>) {
        release_image(previous, self.screen.captured(), &storage::cache_directory());
    }
}
