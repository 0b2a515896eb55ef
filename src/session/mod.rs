//! Capture session coordination.
//!
//! The heart of the pipeline: a state machine that opens the camera
//! device, configures a capture session against the surface set, keeps
//! a repeating preview request running, and submits one-shot still
//! requests on demand. Platform callbacks arrive as explicit transition
//! calls; platform side effects leave through the [`CameraBackend`]
//! trait, so the machine runs in tests without any camera hardware.
//!
//! All transitions execute under a single owner. Wrap the coordinator
//! in a [`SessionController`] to serialize calls arriving from
//! arbitrary callback contexts.

mod backend;
mod controller;
mod coordinator;
mod mock;
mod request;
mod state;

pub use backend::{CameraBackend, DeviceHandle, SessionError, SessionHandle, StatusSink};
pub use controller::SessionController;
pub use coordinator::Coordinator;
pub use mock::{BackendCommand, MockBackend, RecordingSink};
pub use request::{CaptureRequest, RequestKind, RequestTarget};
pub use state::SessionState;
