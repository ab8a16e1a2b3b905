// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │ spawn_blocking
//!            ▼
//! ┌─────────────────────┐
//! │ CameraService trait │  ← permission, open session
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraSession trait │  ← live preview, still capture
//! └──────────┬──────────┘
//!            │
//!            ▼
//!       ┌────────┐
//!       │PipeWire│
//!       └────────┘
//! ```

pub mod enumeration;
pub mod pipeline;
pub mod portal;
pub mod types;

pub use enumeration::{enumerate_cameras, select_device};
pub use pipeline::PipeWireSession;
pub use types::*;

use crate::backends::types::{Facing, PermissionStatus};
use crate::constants::{Quality, app_info};
use crate::errors::CameraError;
use crate::locator::Locator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Camera capability of the host
///
/// Calls may block (portal dialogs, pipeline start-up) and must be issued
/// off the UI thread.
pub trait CameraService: Send + Sync {
    /// Ask for camera access, prompting the user when the host requires it
    fn request_permission(&self) -> PermissionStatus;

    /// Start a live session on the camera facing `facing`
    ///
    /// Preview frames are offered to `frames`; the session stops when the
    /// last handle is dropped.
    fn open_session(
        &self,
        facing: Facing,
        frames: FrameSender,
    ) -> Result<Arc<dyn CameraSession>, CameraError>;
}

/// A running camera
pub trait CameraSession: Send + Sync {
    fn facing(&self) -> Facing;

    /// Encode the current frame to a JPEG file and return its locator
    fn capture_still(&self, quality: Quality) -> Result<Locator, CameraError>;
}

/// Desktop camera service over PipeWire
pub struct PipeWireCamera {
    output_dir: PathBuf,
}

impl PipeWireCamera {
    /// Stills are written to `output_dir`
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl CameraService for PipeWireCamera {
    fn request_permission(&self) -> PermissionStatus {
        if app_info::is_flatpak() {
            match portal::is_camera_present() {
                Ok(false) => {
                    info!("Desktop portal reports no camera");
                    return PermissionStatus::Denied;
                }
                Ok(true) => {}
                Err(e) => warn!(error = %e, "Camera presence query failed"),
            }

            info!("Requesting camera access through the desktop portal");
            return match portal::access_camera() {
                Ok(granted) => PermissionStatus::from_granted(granted),
                Err(e) => {
                    warn!(error = %e, "Camera portal request failed");
                    PermissionStatus::Denied
                }
            };
        }

        // Outside a sandbox access is governed by device ownership
        let cameras = enumerate_cameras();
        info!(count = cameras.len(), "Camera availability checked");
        PermissionStatus::from_granted(!cameras.is_empty())
    }

    fn open_session(
        &self,
        facing: Facing,
        frames: FrameSender,
    ) -> Result<Arc<dyn CameraSession>, CameraError> {
        let cameras = enumerate_cameras();
        let device = select_device(&cameras, facing).ok_or(CameraError::NoCameraFound)?;
        crate::storage::ensure_directory(&self.output_dir)
            .map_err(|e| CameraError::InitializationFailed(e.to_string()))?;

        // Sandboxed clients only see the cameras on the portal's PipeWire remote
        let remote = if app_info::is_flatpak() {
            let fd = portal::open_pipewire_remote()
                .map_err(|e| CameraError::InitializationFailed(e.to_string()))?;
            Some(fd)
        } else {
            None
        };

        let session =
            PipeWireSession::start(device, facing, frames, self.output_dir.clone(), remote)?;
        Ok(Arc::new(session))
    }
}
