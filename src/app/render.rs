// SPDX-License-Identifier: GPL-3.0-only

//! Pure mapping from screen state to what the view shows

use super::prompt::Prompt;
use super::screen::{Operation, Screen, UiMode};
use crate::backends::types::{Facing, PermissionStatus};
use crate::locator::Locator;

/// Main surface of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// Camera permission has not been answered yet
    RequestingPermission,
    /// Camera permission was refused; offers a retry
    CameraPermissionDenied,
    /// Live camera with capture, flip and close controls
    Camera { facing: Facing, capturing: bool },
    /// Open-camera and gallery controls, plus the captured image if any
    Home {
        preview: Option<Locator>,
        picking: bool,
        saving: bool,
    },
}

impl Surface {
    /// Whether the save and clear controls are shown
    pub fn shows_image_actions(&self) -> bool {
        matches!(self, Surface::Home { preview: Some(_), .. })
    }
}

/// Everything the view draws for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub surface: Surface,
    pub prompt: Option<Prompt>,
}

pub fn render(screen: &Screen) -> View {
    let busy = screen.busy();
    let surface = match (screen.camera_permission(), screen.mode()) {
        (PermissionStatus::Unknown, _) => Surface::RequestingPermission,
        (PermissionStatus::Denied, _) => Surface::CameraPermissionDenied,
        (PermissionStatus::Granted, UiMode::Camera) => Surface::Camera {
            facing: screen.facing(),
            capturing: busy == Some(Operation::Capture),
        },
        (PermissionStatus::Granted, UiMode::Default) => Surface::Home {
            preview: screen.captured().cloned(),
            picking: busy == Some(Operation::Pick),
            saving: busy == Some(Operation::Save),
        },
    };

    View {
        surface,
        prompt: screen.prompt().cloned(),
    }
}
