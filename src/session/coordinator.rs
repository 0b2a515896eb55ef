//! The session state machine.

use tracing::{debug, error, info, warn};

use super::backend::{CameraBackend, DeviceHandle, SessionError, SessionHandle, StatusSink};
use super::request::CaptureRequest;
use super::state::SessionState;
use crate::device::CameraIdentity;
use crate::surface::SurfaceSet;

/// Coordinates one camera session: open, configure, preview, capture.
///
/// Every platform callback corresponds to one named transition method.
/// The coordinator assumes a single logical owner — no two transitions
/// run concurrently; wrap it in a
/// [`SessionController`](super::SessionController) when callbacks
/// arrive from multiple contexts.
///
/// Late callbacks are harmless by construction: a device handle
/// delivered after [`close`](Self::close) is closed on the spot, and
/// every other stale event is logged and dropped.
pub struct Coordinator<B: CameraBackend, S: StatusSink> {
    camera: CameraIdentity,
    surfaces: SurfaceSet,
    backend: B,
    sink: S,
    state: SessionState,
    device: Option<DeviceHandle>,
    session: Option<SessionHandle>,
}

impl<B: CameraBackend, S: StatusSink> Coordinator<B, S> {
    /// Creates a coordinator for the given camera and surfaces.
    ///
    /// The camera identity comes from enumeration
    /// ([`find_front_camera`](crate::device::find_front_camera));
    /// permission checks are the caller's precondition and must have
    /// passed before any transition is driven.
    pub fn new(camera: CameraIdentity, surfaces: SurfaceSet, backend: B, sink: S) -> Self {
        Self {
            camera,
            surfaces,
            backend,
            sink,
            state: SessionState::Idle,
            device: None,
            session: None,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` when still captures may be submitted.
    pub fn is_session_ready(&self) -> bool {
        self.state.can_capture() && self.session.is_some()
    }

    /// Returns the surface set this coordinator targets.
    pub fn surfaces(&self) -> &SurfaceSet {
        &self.surfaces
    }

    /// A display surface became available: request the device open.
    ///
    /// Only `Idle` and `Closed` accept this event, which makes repeated
    /// surface callbacks safe: a second event while already opening (or
    /// further along) is logged and dropped.
    pub fn on_surface_available(&mut self) {
        if !self.state.can_open() {
            debug!(state = ?self.state, "surface event ignored");
            return;
        }
        info!(id = %self.camera.id(), "opening camera");
        self.state = SessionState::Opening;
        if let Err(e) = self.backend.open_device(&self.camera) {
            self.fail(e);
        }
    }

    /// Platform delivered an opened device: configure the session.
    pub fn on_device_opened(&mut self, device: DeviceHandle) {
        match self.state {
            SessionState::Opening => {
                info!(id = %device.camera_id(), "camera opened");
                let result = self.backend.configure_session(&device, &self.surfaces);
                self.device = Some(device);
                match result {
                    Ok(()) => self.state = SessionState::ConfiguringSession,
                    Err(e) => self.fail(e),
                }
            }
            SessionState::Closed => {
                // Open raced with teardown; release the handle at once.
                debug!(id = %device.camera_id(), "open callback after close");
                self.backend.close_device(&device);
            }
            _ => debug!(state = ?self.state, "unexpected open callback ignored"),
        }
    }

    /// Platform reported an open failure.
    pub fn on_open_failed(&mut self, reason: &str) {
        if self.state == SessionState::Opening {
            self.fail(SessionError::OpenFailed(reason.to_owned()));
        } else {
            debug!(state = ?self.state, reason, "open failure ignored");
        }
    }

    /// Platform reported the device disconnected.
    pub fn on_disconnected(&mut self) {
        match self.state {
            SessionState::Opening
            | SessionState::Opened
            | SessionState::ConfiguringSession
            | SessionState::SessionReady
            | SessionState::CapturingStill => {
                self.fail(SessionError::Disconnected);
            }
            _ => debug!(state = ?self.state, "disconnect ignored"),
        }
    }

    /// Platform configured the session: start the repeating preview.
    pub fn on_session_configured(&mut self, session: SessionHandle) {
        if self.state != SessionState::ConfiguringSession {
            debug!(state = ?self.state, "configured callback ignored");
            return;
        }
        info!("session created");
        self.session = Some(session);
        let request = CaptureRequest::repeating_preview();
        match self.backend.set_repeating_request(&session, &request) {
            Ok(()) => self.state = SessionState::SessionReady,
            Err(e) => self.fail(e),
        }
    }

    /// Platform failed to configure the session.
    pub fn on_configure_failed(&mut self) {
        if self.state == SessionState::ConfiguringSession {
            self.fail(SessionError::ConfigurationFailed);
        } else {
            debug!(state = ?self.state, "configure failure ignored");
        }
    }

    /// External trigger: submit one still capture.
    ///
    /// Ignored in every state except `SessionReady` — a trigger firing
    /// while the session is still opening, configuring, or already
    /// closed is logged and dropped, never an error. A submission the
    /// platform rejects loses that one capture; the preview keeps
    /// running.
    pub fn request_capture(&mut self) {
        if !self.is_session_ready() {
            debug!(state = ?self.state, "capture trigger ignored");
            return;
        }
        let Some(session) = self.session else {
            debug!("capture trigger ignored: no session handle");
            return;
        };
        self.state = SessionState::CapturingStill;
        let request = CaptureRequest::one_shot_still();
        match self.backend.submit_capture(&session, &request) {
            Ok(()) => info!("still capture submitted"),
            Err(e) => {
                warn!(error = %e, "still capture submission rejected");
                self.sink.show_error(&e.to_string());
            }
        }
        self.state = SessionState::SessionReady;
    }

    /// Platform capture-result callback: capture started. Logged only.
    pub fn on_capture_started(&self) {
        debug!("capture started");
    }

    /// Platform capture-result callback: capture completed.
    ///
    /// Logged only; the frame-ready event on the still target is the
    /// authoritative completion signal and may race with this one.
    pub fn on_capture_completed(&self) {
        debug!("capture completed");
    }

    /// Platform capture-result callback: capture failed. Logged only.
    pub fn on_capture_failed(&self, reason: &str) {
        warn!(reason, "capture failed");
    }

    /// Tears the session down: close the device if one was ever opened.
    ///
    /// Closing the device implicitly cancels the repeating request and
    /// invalidates the session handle. Safe from any state, including
    /// `Idle` (no-op) and `Closed` (idempotent).
    pub fn close(&mut self) {
        if let Some(device) = self.device.take() {
            info!(id = %device.camera_id(), "closing camera");
            self.backend.close_device(&device);
        }
        self.session = None;
        if self.state != SessionState::Closed {
            debug!(from = ?self.state, "session closed");
            self.state = SessionState::Closed;
        }
    }

    fn fail(&mut self, err: SessionError) {
        error!(error = %err, "session attempt failed");
        self.sink.show_error(&err.to_string());
        self.state = SessionState::Error;
    }
}
