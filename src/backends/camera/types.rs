// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use crate::backends::types::Facing;
use std::sync::Arc;

/// A camera exposed by PipeWire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Human readable name (node.description)
    pub name: String,
    /// PipeWire `target-object` value (object.serial, or node id); `None`
    /// lets PipeWire pick its default camera
    pub target: Option<String>,
    /// PipeWire node id, used to query node properties
    pub node_id: Option<String>,
    /// Mounting location reported by libcamera, if any
    pub location: Option<Facing>,
}

impl CameraDevice {
    /// Device that lets PipeWire choose the camera
    pub fn pipewire_default() -> Self {
        Self {
            name: "Default Camera (PipeWire)".to_string(),
            target: None,
            node_id: None,
            location: None,
        }
    }
}

/// A single RGBA preview frame
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Bytes per row (at least `width * 4`)
    pub stride: u32,
    pub data: Arc<[u8]>,
}

impl CameraFrame {
    /// Pixel data with row padding removed, as expected by image handles
    pub fn packed_rgba(&self) -> Vec<u8> {
        let row_len = self.width as usize * 4;
        if self.stride as usize == row_len {
            return self.data.to_vec();
        }
        self.data
            .chunks(self.stride as usize)
            .take(self.height as usize)
            .flat_map(|row| &row[..row_len.min(row.len())])
            .copied()
            .collect()
    }
}

/// Channel sending preview frames from the pipeline to the UI
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_rgba_strips_row_padding() {
        let data: Vec<u8> = vec![
            1, 1, 1, 1, 2, 2, 2, 2, 0, 0, // row 0 + 2 padding bytes
            3, 3, 3, 3, 4, 4, 4, 4, 0, 0, // row 1 + 2 padding bytes
        ];
        let frame = CameraFrame {
            width: 2,
            height: 2,
            stride: 10,
            data: Arc::from(data),
        };

        let packed = frame.packed_rgba();
        assert_eq!(packed.len(), 16);
        assert_eq!(&packed[8..12], &[3, 3, 3, 3]);
    }
}
