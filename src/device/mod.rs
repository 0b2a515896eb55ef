//! Camera discovery and format selection.
//!
//! This module resolves which physical camera to use (the first
//! front-facing identity the platform reports) and which frame format
//! the still-capture sink should be sized for. Enumeration failures are
//! terminal for the session attempt; they are reported, not retried.

mod format;
mod identity;

pub use format::{choose_still_format, Encoding, FrameFormat};
pub use identity::{
    find_front_camera, CameraIdentity, DeviceLister, EnumerationError, Facing, FixedDeviceList,
};
