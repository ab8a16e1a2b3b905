// SPDX-License-Identifier: GPL-3.0-only

//! Types shared by the host capability services

use crate::constants::{CAPTURE_QUALITY, Quality};
use crate::locator::Locator;
use std::fmt;

/// Outcome of a permission request
///
/// `Unknown` is the state before the host has answered for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    #[default]
    Unknown,
    Denied,
    Granted,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    pub fn from_granted(granted: bool) -> Self {
        if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }
}

/// Which way the camera points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Front,
    #[default]
    Back,
}

impl Facing {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }

    /// Parse a libcamera location property (`front`, `back`)
    pub fn from_location(location: &str) -> Option<Self> {
        match location.trim().to_ascii_lowercase().as_str() {
            "front" => Some(Facing::Front),
            "back" => Some(Facing::Back),
            _ => None,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}

/// Options handed to the image picker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerOptions {
    /// Only offer still images
    pub images_only: bool,
    /// Let the user edit or crop the image before it is returned
    pub allows_editing: bool,
    /// Compression quality of the returned copy
    pub quality: Quality,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            images_only: true,
            allows_editing: true,
            quality: CAPTURE_QUALITY,
        }
    }
}

/// Result of presenting the image picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user closed the picker without choosing
    Cancelled,
    /// Locators of the selected assets, in selection order
    Picked(Vec<Locator>),
}

impl PickOutcome {
    /// Locator of the first selected asset
    pub fn first(&self) -> Option<&Locator> {
        match self {
            PickOutcome::Cancelled => None,
            PickOutcome::Picked(assets) => assets.first(),
        }
    }
}

/// An image stored in the media library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub locator: Locator,
}
