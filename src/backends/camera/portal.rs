// SPDX-License-Identifier: GPL-3.0-only

//! XDG desktop portal camera access
//!
//! Sandboxed applications must ask `org.freedesktop.portal.Camera` before
//! PipeWire exposes any camera node to them. The answer arrives as a
//! `Response` signal on a request object whose path is derived from our
//! unique bus name and a handle token.

use std::collections::HashMap;
use std::os::fd::OwnedFd;
use tracing::{debug, info};
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

const PORTAL_DESTINATION: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";

/// Whether the portal reports any camera
pub fn is_camera_present() -> Result<bool, zbus::Error> {
    let connection = zbus::blocking::Connection::session()?;
    let camera = zbus::blocking::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        PORTAL_PATH,
        CAMERA_INTERFACE,
    )?;
    let present: bool = camera.get_property("IsCameraPresent")?;
    Ok(present)
}

/// Ask the portal for camera access; blocks until the user answers
///
/// Returns `Ok(true)` when access was granted.
pub fn access_camera() -> Result<bool, zbus::Error> {
    let connection = zbus::blocking::Connection::session()?;

    let sender = connection
        .unique_name()
        .ok_or_else(|| zbus::Error::Failure("Session bus gave no unique name".to_string()))?
        .to_string();
    let token = format!("snapshot_{}", uuid::Uuid::new_v4().simple());
    let request_path = request_path(&sender, &token);

    // Subscribe before calling so the response cannot be missed
    let request = zbus::blocking::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        request_path.as_str(),
        REQUEST_INTERFACE,
    )?;
    let mut responses = request.receive_signal("Response")?;

    let camera = zbus::blocking::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        PORTAL_PATH,
        CAMERA_INTERFACE,
    )?;
    let mut options: HashMap<&str, Value> = HashMap::new();
    options.insert("handle_token", Value::new(token.as_str()));

    let handle: OwnedObjectPath = camera.call("AccessCamera", &(options,))?;
    debug!(handle = %handle.as_str(), "Camera access requested");

    let message = responses
        .next()
        .ok_or_else(|| zbus::Error::Failure("Portal closed without a response".to_string()))?;
    let body = message.body();
    let (response, _results): (u32, HashMap<String, OwnedValue>) = body.deserialize()?;

    info!(response, "Camera portal answered");
    Ok(response == 0)
}

/// PipeWire connection that exposes only the cameras the portal granted
///
/// Valid after a successful [`access_camera`]; the returned descriptor is
/// handed to `pipewiresrc`.
pub fn open_pipewire_remote() -> Result<OwnedFd, zbus::Error> {
    let connection = zbus::blocking::Connection::session()?;
    let camera = zbus::blocking::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        PORTAL_PATH,
        CAMERA_INTERFACE,
    )?;
    let options: HashMap<&str, Value> = HashMap::new();
    let fd: zbus::zvariant::OwnedFd = camera.call("OpenPipeWireRemote", &(options,))?;
    debug!("Camera portal opened a PipeWire remote");
    Ok(fd.into())
}

/// Object path of the portal request for a sender and handle token
fn request_path(unique_name: &str, token: &str) -> String {
    let sender = unique_name.trim_start_matches(':').replace('.', "_");
    format!("{}/request/{}/{}", PORTAL_PATH, sender, token)
}
