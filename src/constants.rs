// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Compression quality for captured and picked images (0.0 - 1.0)
pub const CAPTURE_QUALITY: Quality = Quality(0.8);

/// Image compression quality on a 0.0 - 1.0 scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Quality(f32);

impl Quality {
    /// Create a quality value, clamped to 0.0 - 1.0
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(1.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw 0.0 - 1.0 value
    pub fn value(&self) -> f32 {
        self.0
    }

    /// JPEG encoder quality (1-100)
    pub fn jpeg_quality(&self) -> u8 {
        ((self.0 * 100.0).round() as u8).max(1)
    }
}

/// Extensions offered by the gallery picker
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];

/// UI Constants
pub mod ui {
    /// Preview thumbnail edge length
    pub const PREVIEW_SIZE: f32 = 250.0;

    /// Preview border radius
    pub const PREVIEW_RADIUS: f32 = 10.0;

    /// Width of the main screen buttons relative to the window
    pub const BUTTON_WIDTH: f32 = 320.0;

    /// Capture button size (outer)
    pub const CAPTURE_BUTTON_OUTER: f32 = 70.0;

    /// Capture button size (inner)
    pub const CAPTURE_BUTTON_INNER: f32 = 50.0;

    /// Camera controls bar background transparency
    pub const CONTROLS_BACKGROUND_ALPHA: f32 = 0.5;

    /// Minimum window size
    pub const MIN_WIDTH: f32 = 360.0;
    pub const MIN_HEIGHT: f32 = 480.0;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Output pixel format for appsink
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Preview frames queued towards the UI before new ones are dropped
    pub const PREVIEW_CHANNEL_CAPACITY: usize = 4;
}

/// Timing constants
pub mod timing {
    /// Pipeline playing state timeout on start
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Pipeline state change timeout on stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 60;

    /// How long the command line waits for a first frame before capturing
    pub const FIRST_FRAME_TIMEOUT_SECS: u64 = 10;
}

/// Gallery folder used when the configuration does not name one
pub const DEFAULT_GALLERY_FOLDER: &str = "Snapshot";

/// Prefix of files written by the camera and picker adapters
pub const FILE_PREFIX: &str = "IMG";

/// Application information
pub mod app_info {
    /// Version string embedded by build.rs
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Whether the application runs inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        std::path::Path::new("/.flatpak-info").exists()
    }
}
