// SPDX-License-Identifier: GPL-3.0-only

//! Media processing utilities
//!
//! Camera frames arrive as RGBA from the GStreamer pipeline and are stored as
//! JPEG. Picked images are decoded and re-encoded the same way so every
//! locator handed to the screen names a JPEG at the configured quality.

pub mod encoding;

pub use encoding::{encode_jpeg, recompress_file, rgba_to_rgb, write_jpeg};
