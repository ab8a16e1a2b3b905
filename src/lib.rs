// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot - take a photo or pick one from the gallery, then save it
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Screen state, handlers and the COSMIC application shell
//! - [`backends`]: Host capability services (camera, picker, media library)
//! - [`media`]: JPEG encoding of camera frames and picked images
//! - [`config`]: User configuration handling
//! - [`storage`]: Gallery and cache directories
//! - [`locator`]: Opaque references to images

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod locator;
pub mod media;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Message};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use locator::Locator;
