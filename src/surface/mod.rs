//! Capture output surfaces.
//!
//! A session writes frames into exactly two sinks: a live preview
//! target bound to an on-screen view, and a still-capture target backed
//! by a small bounded queue. Both are owned by the hosting screen and
//! outlive individual sessions. The still queue's slots provide the
//! only backpressure in the pipeline: persistence must keep pace with
//! capture or frame production stalls at the platform layer.

mod frame;
mod target;

pub use frame::{CapturedFrame, SlotPool};
pub use target::{PreviewTarget, QueueFull, StillTarget};

use crate::device::FrameFormat;

/// The two sinks a capture session may write frames into.
#[derive(Debug, Clone)]
pub struct SurfaceSet {
    preview: PreviewTarget,
    still: StillTarget,
}

impl SurfaceSet {
    /// Creates a surface set with the given preview and still formats.
    ///
    /// `still_queue_depth` bounds the number of in-flight still frames;
    /// the conventional depth of 2 allows one frame to be produced
    /// while the previous one is being persisted.
    pub fn new(preview: FrameFormat, still: FrameFormat, still_queue_depth: usize) -> Self {
        Self {
            preview: PreviewTarget::new(preview),
            still: StillTarget::new(still, still_queue_depth),
        }
    }

    /// Returns the preview target.
    pub fn preview(&self) -> &PreviewTarget {
        &self.preview
    }

    /// Returns the still-capture target.
    pub fn still(&self) -> &StillTarget {
        &self.still
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_set_holds_both_targets() {
        let set = SurfaceSet::new(FrameFormat::yuv(1920, 1080), FrameFormat::jpeg(640, 480), 2);
        assert_eq!(set.preview().format(), FrameFormat::yuv(1920, 1080));
        assert_eq!(set.still().format(), FrameFormat::jpeg(640, 480));
        assert_eq!(set.still().free_slots(), 2);
    }
}
