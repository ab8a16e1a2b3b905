// SPDX-License-Identifier: GPL-3.0-only

//! Host capability services
//!
//! The screen never touches hardware or files itself. Each capability is a
//! trait with a Linux desktop implementation:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                  │
//! └────────────────────┬────────────────────────┘
//!                      │ Host
//! ┌────────────────────┴────────────────────────┐
//! │  ┌────────────┐ ┌────────────┐ ┌─────────┐  │
//! │  │   Camera   │ │   Picker   │ │ Library │  │
//! │  │ (PipeWire) │ │   (rfd)    │ │ (~/Pic) │  │
//! │  └────────────┘ └────────────┘ └─────────┘  │
//! └─────────────────────────────────────────────┘
//! ```

pub mod camera;
pub mod library;
pub mod picker;
pub mod types;

pub use camera::{CameraService, CameraSession, PipeWireCamera};
pub use library::{DesktopLibrary, MediaLibrary};
pub use picker::{DesktopPicker, ImagePicker};
pub use types::{Asset, Facing, PermissionStatus, PickOutcome, PickerOptions};

use crate::config::Config;
use crate::storage;
use std::sync::Arc;

/// The set of host services the screen calls into
#[derive(Clone)]
pub struct Host {
    pub camera: Arc<dyn CameraService>,
    pub picker: Arc<dyn ImagePicker>,
    pub library: Arc<dyn MediaLibrary>,
}

impl Host {
    /// Services for the Linux desktop
    pub fn desktop(config: &Config) -> Self {
        let cache = storage::cache_directory();
        Self {
            camera: Arc::new(PipeWireCamera::new(cache.clone())),
            picker: Arc::new(DesktopPicker::new(storage::pictures_directory(), cache)),
            library: Arc::new(DesktopLibrary::new(storage::gallery_directory(
                config.gallery_folder(),
            ))),
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
