// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire GStreamer pipeline for a live camera session

use super::CameraSession;
use super::types::{CameraDevice, CameraFrame, FrameSender};
use crate::backends::types::Facing;
use crate::constants::{Quality, pipeline, timing};
use crate::errors::CameraError;
use crate::locator::Locator;
use crate::media;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Live camera session backed by `pipewiresrc`
///
/// Every decoded frame replaces the latest frame and is offered to the
/// preview channel. Still captures encode the latest frame. Dropping the
/// session stops the pipeline and releases the camera.
pub struct PipeWireSession {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
    latest: Arc<Mutex<Option<CameraFrame>>>,
    facing: Facing,
    device_name: String,
    output_dir: PathBuf,
    /// PipeWire connection handed out by the camera portal; must outlive the pipeline
    remote: Option<OwnedFd>,
}

impl PipeWireSession {
    /// Build and start the pipeline for `device`
    ///
    /// `remote` is the PipeWire connection from the camera portal when
    /// sandboxed; without it `pipewiresrc` connects to the session daemon.
    pub fn start(
        device: &CameraDevice,
        facing: Facing,
        frame_sender: FrameSender,
        output_dir: PathBuf,
        remote: Option<OwnedFd>,
    ) -> Result<Self, CameraError> {
        info!(
            device = %device.name,
            %facing,
            portal = remote.is_some(),
            "Creating PipeWire pipeline"
        );

        gstreamer::init().map_err(|e| CameraError::InitializationFailed(e.to_string()))?;

        let description = pipeline_description(
            device.target.as_deref(),
            remote.as_ref().map(AsRawFd::as_raw_fd),
        );
        debug!(pipeline = %description, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&description)
            .map_err(|e| CameraError::InitializationFailed(e.to_string()))?
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| CameraError::InitializationFailed("Not a pipeline".to_string()))?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CameraError::InitializationFailed("Failed to get appsink".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| CameraError::InitializationFailed("Failed to cast appsink".to_string()))?;

        let latest: Arc<Mutex<Option<CameraFrame>>> = Arc::new(Mutex::new(None));
        let latest_slot = Arc::clone(&latest);
        let frame_counter = AtomicU64::new(0);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_num = frame_counter.fetch_add(1, Ordering::Relaxed);
                    let frame = pull_frame(appsink).inspect_err(|e| {
                        if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                            warn!(frame = frame_num, error = ?e, "Dropping unusable sample");
                        }
                    })?;

                    if let Ok(mut slot) = latest_slot.lock() {
                        *slot = Some(frame.clone());
                    }

                    // Preview may drop frames when the UI is busy
                    let mut sender = frame_sender.clone();
                    if let Err(e) = sender.try_send(frame) {
                        if e.is_disconnected() {
                            return Err(gstreamer::FlowError::Eos);
                        }
                        if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                            debug!(frame = frame_num, "Preview frame dropped (channel full)");
                        }
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            CameraError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");
        if state != gstreamer::State::Playing {
            warn!("Pipeline is not in PLAYING state yet");
        }

        Ok(Self {
            pipeline,
            appsink,
            latest,
            facing,
            device_name: device.name.clone(),
            output_dir,
            remote,
        })
    }
}

impl CameraSession for PipeWireSession {
    fn facing(&self) -> Facing {
        self.facing
    }

    fn capture_still(&self, quality: Quality) -> Result<Locator, CameraError> {
        let frame = self
            .latest
            .lock()
            .map_err(|_| CameraError::NoFrameAvailable)?
            .clone()
            .ok_or(CameraError::NoFrameAvailable)?;

        let started = Instant::now();
        let rgb = media::rgba_to_rgb(&frame).map_err(CameraError::EncodingFailed)?;
        let data = media::encode_jpeg(&rgb, quality).map_err(CameraError::EncodingFailed)?;
        let path = media::write_jpeg(&data, &self.output_dir)
            .map_err(|e| CameraError::SaveFailed(e.to_string()))?;

        info!(
            path = %path.display(),
            width = frame.width,
            height = frame.height,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Still captured"
        );
        Locator::from_path(&path)
            .ok_or_else(|| CameraError::SaveFailed(path.display().to_string()))
    }
}

impl Drop for PipeWireSession {
    fn drop(&mut self) {
        info!(device = %self.device_name, "Stopping camera session");
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            error!(error = %e, "Failed to stop pipeline");
            return;
        }
        let _ = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        // pipewiresrc works on its own duplicate; ours closes once the pipeline is down
        drop(self.remote.take());
    }
}

/// gst-launch description for a camera
///
/// A `None` target lets PipeWire pick its default camera. `fd` is a portal
/// PipeWire connection to use instead of the session daemon.
fn pipeline_description(target: Option<&str>, fd: Option<RawFd>) -> String {
    let mut source = "pipewiresrc".to_string();
    if let Some(fd) = fd {
        source.push_str(&format!(" fd={}", fd));
    }
    if let Some(target) = target {
        source.push_str(&format!(" target-object={}", target));
    }
    format!(
        "{} do-timestamp=true ! videoconvert ! video/x-raw,format={} ! appsink name=sink sync=false drop=true max-buffers={}",
        source,
        pipeline::OUTPUT_FORMAT,
        pipeline::MAX_BUFFERS
    )
}

fn pull_frame(appsink: &AppSink) -> Result<CameraFrame, gstreamer::FlowError> {
    let sample = appsink.pull_sample().map_err(|_| gstreamer::FlowError::Eos)?;
    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;

    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
        return Err(gstreamer::FlowError::Error);
    }

    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
    let video_info = VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::Error)?;
    let map = buffer
        .map_readable()
        .map_err(|_| gstreamer::FlowError::Error)?;

    Ok(CameraFrame {
        width: video_info.width(),
        height: video_info.height(),
        stride: video_info.stride()[0] as u32,
        data: Arc::from(map.as_slice()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_description_targets_device() {
        let description = pipeline_description(Some("2146"), None);
        assert!(description.starts_with("pipewiresrc target-object=2146 do-timestamp=true"));
        assert!(description.contains("format=RGBA"));
        assert!(description.ends_with("max-buffers=2"));
    }

    #[test]
    fn test_pipeline_description_default_camera() {
        let description = pipeline_description(None, None);
        assert!(!description.contains("target-object"));
        assert!(!description.contains("fd="));
        assert!(description.contains("appsink name=sink"));
    }

    #[test]
    fn test_pipeline_description_uses_portal_remote() {
        let description = pipeline_description(None, Some(17));
        assert!(description.starts_with("pipewiresrc fd=17 do-timestamp=true"));

        let description = pipeline_description(Some("54"), Some(17));
        assert!(description.starts_with("pipewiresrc fd=17 target-object=54"));
    }
}
