// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use super::screen::{SaveOutcome, Screen};
use crate::backends::Host;
use crate::backends::camera::{CameraFrame, CameraSession};
use crate::backends::types::{Facing, PermissionStatus, PickOutcome};
use crate::config::Config;
use crate::errors::{CameraError, PickerError};
use crate::locator::Locator;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a running camera session
#[derive(Clone)]
pub struct SessionHandle(pub Arc<dyn CameraSession>);

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("facing", &self.0.facing())
            .finish()
    }
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Host capability services
    pub host: Host,
    /// View state of the capture screen
    pub screen: Screen,
    /// Live session while camera mode is active
    pub session: Option<SessionHandle>,
    /// Latest preview frame, converted for the image widget
    pub preview: Option<cosmic::widget::image::Handle>,
    /// Theme dropdown labels
    pub theme_options: Vec<String>,
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),
    /// Close the prompt currently shown
    DismissPrompt,

    // ===== Permissions =====
    CameraPermission(PermissionStatus),
    GalleryPermission(PermissionStatus),
    RetryCameraPermission,

    // ===== Camera =====
    OpenCamera,
    CloseCamera,
    ToggleFacing,
    /// Camera session started for the given facing
    SessionStarted(Facing, SessionHandle),
    /// Camera session could not be started
    SessionFailed(CameraError),
    /// New preview frame received from the pipeline
    CameraFrame(Arc<CameraFrame>),

    // ===== Capture / Gallery / Save =====
    Capture,
    CaptureFinished(Result<Locator, CameraError>),
    PickImage,
    PickFinished(Result<PickOutcome, PickerError>),
    SaveImage,
    SaveFinished(SaveOutcome),
    ClearImage,

    // ===== Settings =====
    UpdateConfig(Config),
    SetAppTheme(usize),
    SetClearAfterFailedSave(bool),
    OpenGalleryFolder,
}
