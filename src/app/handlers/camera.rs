// SPDX-License-Identifier: GPL-3.0-only

//! Camera mode handlers
//!
//! Handles entering and leaving camera mode, facing changes and the live
//! preview subscription.

use super::run_blocking;
use crate::app::screen::UiMode;
use crate::app::state::{AppModel, Message, SessionHandle};
use crate::backends::camera::{CameraFrame, CameraService};
use crate::backends::types::Facing;
use crate::constants::{pipeline, timing};
use crate::errors::CameraError;
use cosmic::Task;
use cosmic::iced::Subscription;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Live preview for the camera facing `facing`
///
/// Opens a session, hands its handle to the app, then forwards frames until
/// the subscription is dropped. Dropping it releases the camera.
pub fn preview_subscription(
    camera: Arc<dyn CameraService>,
    facing: Facing,
) -> Subscription<Message> {
    use cosmic::iced::futures::{SinkExt, StreamExt};

    Subscription::run_with_id(
        ("camera-preview", facing),
        cosmic::iced::stream::channel(
            pipeline::PREVIEW_CHANNEL_CAPACITY,
            move |mut output| async move {
                info!(%facing, "Camera subscription started");

                let (sender, mut frames) =
                    futures::channel::mpsc::channel(pipeline::PREVIEW_CHANNEL_CAPACITY);
                let opened = run_blocking(move || camera.open_session(facing, sender))
                    .await
                    .unwrap_or_else(|e| Err(CameraError::InitializationFailed(e)));

                let session = match opened {
                    Ok(session) => session,
                    Err(e) => {
                        error!(error = %e, "Failed to start camera");
                        let _ = output.send(Message::SessionFailed(e)).await;
                        return;
                    }
                };

                if output
                    .send(Message::SessionStarted(
                        facing,
                        SessionHandle(Arc::clone(&session)),
                    ))
                    .await
                    .is_err()
                {
                    return;
                }

                let mut frame_count = 0u64;
                while let Some(frame) = frames.next().await {
                    frame_count += 1;
                    if frame_count % timing::FRAME_LOG_INTERVAL == 0 {
                        debug!(
                            frame = frame_count,
                            width = frame.width,
                            height = frame.height,
                            "Received frame from pipeline"
                        );
                    }

                    // Preview only needs the latest frame
                    if let Err(e) = output.try_send(Message::CameraFrame(Arc::new(frame)))
                        && e.is_disconnected()
                    {
                        info!("Output channel disconnected - camera subscription ending");
                        break;
                    }
                }

                info!(%facing, "Camera subscription stopped");
                drop(session);
            },
        ),
    )
}

impl AppModel {
    pub(crate) fn handle_open_camera(&mut self) -> Task<cosmic::Action<Message>> {
        if self.screen.open_camera() {
            info!(facing = %self.screen.facing(), "Camera mode opened");
        }
        Task::none()
    }

    pub(crate) fn handle_close_camera(&mut self) -> Task<cosmic::Action<Message>> {
        self.screen.close_camera();
        self.stop_camera();
        Task::none()
    }

    pub(crate) fn handle_toggle_facing(&mut self) -> Task<cosmic::Action<Message>> {
        self.screen.toggle_facing();
        // The preview subscription is keyed on facing and restarts by itself
        self.stop_camera();
        Task::none()
    }

    pub(crate) fn handle_session_started(
        &mut self,
        facing: Facing,
        handle: SessionHandle,
    ) -> Task<cosmic::Action<Message>> {
        if self.screen.mode() != UiMode::Camera || self.screen.facing() != facing {
            debug!(%facing, "Discarding stale camera session");
            return Task::none();
        }
        info!(%facing, "Camera session ready");
        self.session = Some(handle);
        Task::none()
    }

    pub(crate) fn handle_session_failed(
        &mut self,
        error: CameraError,
    ) -> Task<cosmic::Action<Message>> {
        warn!(%error, "Leaving camera mode");
        self.screen.camera_failed();
        self.stop_camera();
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        if self.screen.mode() != UiMode::Camera {
            return Task::none();
        }
        self.preview = Some(cosmic::widget::image::Handle::from_rgba(
            frame.width,
            frame.height,
            frame.packed_rgba(),
        ));
        Task::none()
    }

    /// Release the session handle and the last preview frame
    pub(crate) fn stop_camera(&mut self) {
        if self.session.take().is_some() {
            info!("Camera session released");
        }
        self.preview = None;
    }
}
