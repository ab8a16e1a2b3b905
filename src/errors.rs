// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the application and its host adapters
//!
//! Every host capability reports its own error enum. The GUI turns any of them
//! into a single informational prompt; the command line propagates them as
//! [`AppError`].

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// A permission-gated host capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Live camera access
    Camera,
    /// Adding images to the gallery
    GalleryWrite,
}

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The host refused access to a capability
    PermissionDenied(Capability),
    /// Camera session or still capture failed
    Camera(CameraError),
    /// The image picker failed
    Picker(PickerError),
    /// The media library failed to create an asset
    Library(LibraryError),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// No camera devices found
    NoCameraFound,
    /// Pipeline could not be created or started
    InitializationFailed(String),
    /// Capture requested before the session delivered a frame
    NoFrameAvailable,
    /// Frame could not be encoded
    EncodingFailed(String),
    /// Encoded frame could not be written
    SaveFailed(String),
}

/// Image picker errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// The native dialog could not be shown
    DialogFailed(String),
    /// The selected file could not be read or decoded
    Unreadable(String),
    /// The selected image could not be re-encoded
    EncodingFailed(String),
}

/// Media library errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// The locator does not name a readable local file
    MissingSource(String),
    /// The gallery folder could not be written
    WriteFailed(String),
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Camera => write!(f, "camera"),
            Capability::GalleryWrite => write!(f, "gallery write"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::PermissionDenied(cap) => write!(f, "Permission denied: {}", cap),
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Picker(e) => write!(f, "Picker error: {}", e),
            AppError::Library(e) => write!(f, "Media library error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::NoFrameAvailable => write!(f, "No frame available for capture"),
            CameraError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CameraError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::DialogFailed(msg) => write!(f, "File dialog failed: {}", msg),
            PickerError::Unreadable(msg) => write!(f, "Selected image is unreadable: {}", msg),
            PickerError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::MissingSource(msg) => write!(f, "Source image missing: {}", msg),
            LibraryError::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PickerError {}
impl std::error::Error for LibraryError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<PickerError> for AppError {
    fn from(err: PickerError) -> Self {
        AppError::Picker(err)
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        AppError::Library(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}
