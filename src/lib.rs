//! Selfie Capture Library
//!
//! Captures still photographs from a device's front-facing camera,
//! triggered either by a manual action or by a headphone-unplug event,
//! and persists each photograph as a JPEG file with a timestamped name.
//!
//! # Architecture
//!
//! The system follows an explicit control flow:
//!
//! ```text
//! device (enumerate) → session (open → configure → preview → capture)
//!                          ↓                            ↓
//!                  surface (preview + still)     persist (write + index)
//!                          ↑
//!                  trigger (manual / headphone broadcast)
//! ```
//!
//! # Design Principles
//!
//! - **Single owner**: all session state transitions run under one lock;
//!   platform callbacks are translated into explicit transition calls
//! - **Platform behind traits**: camera hardware, the UI error surface, and
//!   the media indexer are collaborators, swappable for mocks in tests
//! - **Scoped frames**: a captured frame returns its queue slot when
//!   dropped, on success and failure paths alike
//! - **Fail terminal**: open and configuration errors end the session
//!   attempt; nothing is retried automatically
//!
//! # Example
//!
//! ```no_run
//! use selfie::{
//!     device::{find_front_camera, CameraIdentity, Facing, FixedDeviceList, FrameFormat},
//!     session::{Coordinator, MockBackend, RecordingSink, SessionController},
//!     surface::SurfaceSet,
//! };
//!
//! let lister = FixedDeviceList::new(vec![
//!     CameraIdentity::new("0", Facing::Back),
//!     CameraIdentity::new("1", Facing::Front),
//! ]);
//! let camera = find_front_camera(&lister).unwrap();
//!
//! let surfaces = SurfaceSet::new(
//!     FrameFormat::jpeg(1920, 1080),
//!     FrameFormat::jpeg(640, 480),
//!     2,
//! );
//!
//! let backend = MockBackend::new();
//! let sink = RecordingSink::new();
//! let coordinator = Coordinator::new(camera, surfaces, backend, sink);
//! let controller = SessionController::new(coordinator);
//!
//! // Platform adapter drives the transitions from here.
//! controller.on_surface_available();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod device;
pub mod persist;
pub mod session;
pub mod surface;
pub mod trigger;

// Re-export commonly used types at crate root
pub use config::{FileConfig, SelfieConfig};
pub use device::{find_front_camera, CameraIdentity, Facing, FrameFormat};
pub use persist::{MediaIndex, PhotoWriter};
pub use session::{CameraBackend, Coordinator, SessionController, SessionState, StatusSink};
pub use surface::{CapturedFrame, SurfaceSet};
pub use trigger::{CaptureRequester, EventTriggers, HeadphoneEvent};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
