//! Mock backend and status sink for tests and demos.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::backend::{CameraBackend, DeviceHandle, SessionError, SessionHandle, StatusSink};
use super::request::{CaptureRequest, RequestKind};
use crate::device::CameraIdentity;
use crate::surface::SurfaceSet;

/// A backend command as recorded by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// `open_device` was called for this camera id.
    OpenDevice(String),
    /// `configure_session` was called for this device.
    ConfigureSession(DeviceHandle),
    /// `set_repeating_request` was called with this request.
    SetRepeating(CaptureRequest),
    /// `submit_capture` was called with this request.
    SubmitCapture(CaptureRequest),
    /// `close_device` was called for this device.
    CloseDevice(DeviceHandle),
}

#[derive(Debug, Default)]
struct MockState {
    commands: Vec<BackendCommand>,
    fail_open: Option<SessionError>,
    fail_configure: Option<SessionError>,
    fail_repeating: Option<SessionError>,
    fail_capture: Option<SessionError>,
}

/// Records every command the coordinator issues, without any hardware.
///
/// Each `fail_*` knob arms a one-shot synchronous rejection: the next
/// matching call returns the error without being recorded. Clones share
/// state, so tests can keep a handle after moving the backend into a
/// coordinator.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Creates an empty mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot rejection of the next `open_device` call.
    pub fn fail_open(&self, err: SessionError) {
        self.lock().fail_open = Some(err);
    }

    /// Arms a one-shot rejection of the next `configure_session` call.
    pub fn fail_configure(&self, err: SessionError) {
        self.lock().fail_configure = Some(err);
    }

    /// Arms a one-shot rejection of the next `set_repeating_request` call.
    pub fn fail_repeating(&self, err: SessionError) {
        self.lock().fail_repeating = Some(err);
    }

    /// Arms a one-shot rejection of the next `submit_capture` call.
    pub fn fail_capture(&self, err: SessionError) {
        self.lock().fail_capture = Some(err);
    }

    /// Returns every recorded command in issue order.
    pub fn commands(&self) -> Vec<BackendCommand> {
        self.lock().commands.clone()
    }

    /// Returns how many devices were opened.
    pub fn open_count(&self) -> usize {
        self.lock()
            .commands
            .iter()
            .filter(|c| matches!(c, BackendCommand::OpenDevice(_)))
            .count()
    }

    /// Returns every repeating request installed.
    pub fn repeating_requests(&self) -> Vec<CaptureRequest> {
        self.lock()
            .commands
            .iter()
            .filter_map(|c| match c {
                BackendCommand::SetRepeating(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns every one-shot capture submitted.
    pub fn capture_submissions(&self) -> Vec<CaptureRequest> {
        self.lock()
            .commands
            .iter()
            .filter_map(|c| match c {
                BackendCommand::SubmitCapture(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns every device closed, in close order.
    pub fn closed_devices(&self) -> Vec<DeviceHandle> {
        self.lock()
            .commands
            .iter()
            .filter_map(|c| match c {
                BackendCommand::CloseDevice(d) => Some(d.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CameraBackend for MockBackend {
    fn open_device(&self, camera: &CameraIdentity) -> Result<(), SessionError> {
        let mut state = self.lock();
        if let Some(err) = state.fail_open.take() {
            return Err(err);
        }
        state
            .commands
            .push(BackendCommand::OpenDevice(camera.id().to_owned()));
        Ok(())
    }

    fn configure_session(
        &self,
        device: &DeviceHandle,
        _surfaces: &SurfaceSet,
    ) -> Result<(), SessionError> {
        let mut state = self.lock();
        if let Some(err) = state.fail_configure.take() {
            return Err(err);
        }
        state
            .commands
            .push(BackendCommand::ConfigureSession(device.clone()));
        Ok(())
    }

    fn set_repeating_request(
        &self,
        _session: &SessionHandle,
        request: &CaptureRequest,
    ) -> Result<(), SessionError> {
        debug_assert_eq!(request.kind, RequestKind::Repeating);
        let mut state = self.lock();
        if let Some(err) = state.fail_repeating.take() {
            return Err(err);
        }
        state
            .commands
            .push(BackendCommand::SetRepeating(request.clone()));
        Ok(())
    }

    fn submit_capture(
        &self,
        _session: &SessionHandle,
        request: &CaptureRequest,
    ) -> Result<(), SessionError> {
        debug_assert_eq!(request.kind, RequestKind::OneShot);
        let mut state = self.lock();
        if let Some(err) = state.fail_capture.take() {
            return Err(err);
        }
        state
            .commands
            .push(BackendCommand::SubmitCapture(request.clone()));
        Ok(())
    }

    fn close_device(&self, device: &DeviceHandle) {
        self.lock()
            .commands
            .push(BackendCommand::CloseDevice(device.clone()));
    }
}

#[derive(Debug, Default)]
struct SinkState {
    errors: Vec<String>,
    notices: Vec<String>,
    preview_visible: bool,
}

/// Records error and notification messages for assertions.
///
/// Models the preview view's visibility the way the UI collaborator
/// must: `show_error` hides the preview.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
}

impl RecordingSink {
    /// Creates a sink with the preview initially visible.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SinkState {
                preview_visible: true,
                ..Default::default()
            })),
        }
    }

    /// Returns every error shown so far.
    pub fn errors(&self) -> Vec<String> {
        self.lock().errors.clone()
    }

    /// Returns every notification shown so far.
    pub fn notices(&self) -> Vec<String> {
        self.lock().notices.clone()
    }

    /// Returns whether the preview view is still visible.
    pub fn preview_visible(&self) -> bool {
        self.lock().preview_visible
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for RecordingSink {
    fn show_error(&self, message: &str) {
        debug!(message, "recording sink: error shown");
        let mut state = self.lock();
        state.errors.push(message.to_owned());
        state.preview_visible = false;
    }

    fn notify(&self, message: &str) {
        let mut state = self.lock();
        state.notices.push(message.to_owned());
    }
}
