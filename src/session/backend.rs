//! Platform seams: the camera backend and the UI status surface.

use thiserror::Error;

use super::request::CaptureRequest;
use crate::surface::SurfaceSet;

/// Handle to an opened camera device.
///
/// Delivered by the platform's open callback and owned exclusively by
/// the coordinator until it is closed. Closing the device invalidates
/// every session created from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    camera_id: String,
}

impl DeviceHandle {
    /// Creates a handle for the camera it was opened from.
    pub fn new(camera_id: impl Into<String>) -> Self {
        Self {
            camera_id: camera_id.into(),
        }
    }

    /// Returns the id of the camera this handle was opened from.
    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }
}

/// Handle to a configured capture session.
///
/// Valid only while its device handle is open; the platform tears it
/// down implicitly when the device closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle {
    token: u64,
}

impl SessionHandle {
    /// Creates a session handle from a platform token.
    pub fn new(token: u64) -> Self {
        Self { token }
    }

    /// Returns the platform token.
    pub fn token(&self) -> u64 {
        self.token
    }
}

/// Errors terminal for the current session attempt.
///
/// None of these are retried; each replaces the preview with an error
/// message and waits for a manual relaunch.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("failed to open camera: {0}")]
    OpenFailed(String),
    #[error("camera access denied: {0}")]
    AccessDenied(String),
    #[error("camera disconnected")]
    Disconnected,
    #[error("session configuration failed")]
    ConfigurationFailed,
}

/// Platform camera operations, all fire-and-forget.
///
/// A synchronous `Err` means the platform rejected the call outright
/// (access revoked, device gone); asynchronous outcomes arrive later as
/// coordinator transition calls. Implementations must tolerate
/// `close_device` for a device whose callbacks are still in flight.
pub trait CameraBackend {
    /// Asks the platform to open the given camera.
    fn open_device(&self, camera: &crate::device::CameraIdentity) -> Result<(), SessionError>;

    /// Asks the platform to configure a session against both surfaces.
    fn configure_session(
        &self,
        device: &DeviceHandle,
        surfaces: &SurfaceSet,
    ) -> Result<(), SessionError>;

    /// Installs the session's continuous request.
    fn set_repeating_request(
        &self,
        session: &SessionHandle,
        request: &CaptureRequest,
    ) -> Result<(), SessionError>;

    /// Submits a one-shot capture request.
    fn submit_capture(
        &self,
        session: &SessionHandle,
        request: &CaptureRequest,
    ) -> Result<(), SessionError>;

    /// Closes the device, cancelling its repeating request and session.
    fn close_device(&self, device: &DeviceHandle);
}

/// User-facing status surface.
pub trait StatusSink {
    /// Shows a terminal error message; implementations must also hide
    /// the live preview.
    fn show_error(&self, message: &str);

    /// Shows a transient notification (e.g. "Photo captured").
    fn notify(&self, message: &str);
}
