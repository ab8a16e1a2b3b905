// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera discovery
//!
//! Cameras are PipeWire nodes of class `Video/Source`. `pw-cli ls Node` lists
//! them; the libcamera mounting location (front/back) is only visible through
//! `pw-cli info <id>`.

use super::types::CameraDevice;
use crate::backends::types::Facing;
use tracing::{debug, info, warn};

/// Enumerate cameras available through PipeWire
///
/// Returns an empty list when GStreamer has no `pipewiresrc`. When PipeWire is
/// usable but `pw-cli` is missing, a single default camera is returned.
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    if let Err(e) = gstreamer::init() {
        warn!(error = %e, "GStreamer init failed");
        return Vec::new();
    }

    if gstreamer::ElementFactory::make("pipewiresrc")
        .build()
        .is_err()
    {
        debug!("pipewiresrc not available");
        return Vec::new();
    }

    match list_with_pw_cli() {
        Some(cameras) if !cameras.is_empty() => {
            info!(count = cameras.len(), "Found PipeWire cameras");
            cameras
        }
        _ => {
            info!("Using PipeWire auto-selection (default camera)");
            vec![CameraDevice::pipewire_default()]
        }
    }
}

fn list_with_pw_cli() -> Option<Vec<CameraDevice>> {
    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli ls failed");
        return None;
    }

    let mut cameras = parse_node_list(&String::from_utf8_lossy(&output.stdout));
    for camera in &mut cameras {
        if let Some(node_id) = camera.node_id.as_deref() {
            camera.location = query_location(node_id);
        }
    }
    Some(cameras)
}

fn query_location(node_id: &str) -> Option<Facing> {
    let output = std::process::Command::new("pw-cli")
        .args(["info", node_id])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let location = parse_location(&String::from_utf8_lossy(&output.stdout));
    debug!(node_id, ?location, "Queried camera location");
    location
}

/// Parse `pw-cli ls Node` output into video source devices
pub fn parse_node_list(output: &str) -> Vec<CameraDevice> {
    #[derive(Default)]
    struct Node {
        id: Option<String>,
        serial: Option<String>,
        description: Option<String>,
        is_video_source: bool,
    }

    fn finish(node: Node, cameras: &mut Vec<CameraDevice>) {
        if !node.is_video_source {
            return;
        }
        let (Some(id), Some(name)) = (node.id, node.description) else {
            return;
        };
        cameras.push(CameraDevice {
            name,
            target: Some(node.serial.unwrap_or_else(|| id.clone())),
            node_id: Some(id),
            location: None,
        });
    }

    let mut cameras = Vec::new();
    let mut current = Node::default();

    for line in output.lines() {
        let trimmed = line.trim();

        // "id 76, type PipeWire:Interface:Node/3"
        if let Some(rest) = trimmed.strip_prefix("id ")
            && trimmed.contains("PipeWire:Interface:Node")
        {
            finish(std::mem::take(&mut current), &mut cameras);
            current.id = rest.split(',').next().map(|id| id.trim().to_string());
            continue;
        }

        if trimmed.contains("media.class") {
            current.is_video_source = quoted_value(trimmed).as_deref() == Some("Video/Source");
        } else if trimmed.contains("object.serial") {
            current.serial = quoted_value(trimmed);
        } else if trimmed.contains("node.description") {
            current.description = quoted_value(trimmed);
        }
    }
    finish(current, &mut cameras);

    cameras
}

/// Parse the `api.libcamera.location` property from `pw-cli info` output
pub fn parse_location(output: &str) -> Option<Facing> {
    output
        .lines()
        .find(|line| line.contains("api.libcamera.location"))
        .and_then(quoted_value)
        .and_then(|value| Facing::from_location(&value))
}

/// Pick the device for a facing direction
///
/// Prefers a device reporting that location. Without location data, desktop
/// webcams face the user, so the first device serves `Front` and a second
/// device (if any) serves `Back`.
pub fn select_device(devices: &[CameraDevice], facing: Facing) -> Option<&CameraDevice> {
    if let Some(device) = devices.iter().find(|d| d.location == Some(facing)) {
        return Some(device);
    }

    match facing {
        Facing::Front => devices.first(),
        Facing::Back => devices.get(1).or_else(|| devices.first()),
    }
}

/// Extract quoted value from a property line (e.g., 'property = "value"' -> "value")
fn quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}
