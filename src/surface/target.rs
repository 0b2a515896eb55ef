//! Preview and still-capture sinks.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, trace};

use super::frame::{CapturedFrame, SlotPool};
use crate::device::FrameFormat;

/// The live preview sink, bound to an on-screen view.
///
/// The pipeline only ever names this target in repeating requests; the
/// platform renders into it directly, so no frame data passes through
/// here.
#[derive(Debug, Clone)]
pub struct PreviewTarget {
    format: FrameFormat,
}

impl PreviewTarget {
    /// Creates a preview target with the given format.
    pub fn new(format: FrameFormat) -> Self {
        Self { format }
    }

    /// Returns the preview format.
    pub fn format(&self) -> FrameFormat {
        self.format
    }
}

/// Returned when the still queue has no free slot for a new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("still queue full; frame dropped upstream")]
pub struct QueueFull;

/// The still-capture sink: an image-reader-like queue of encoded frames.
///
/// Bounded by a [`SlotPool`]; a frame's slot is held from production
/// until the consumer drops the frame. Cloning shares the same queue.
#[derive(Debug, Clone)]
pub struct StillTarget {
    format: FrameFormat,
    inner: Arc<StillInner>,
}

#[derive(Debug)]
struct StillInner {
    pool: Arc<SlotPool>,
    queue: Mutex<VecDeque<CapturedFrame>>,
}

impl StillTarget {
    /// Creates a still target with the given format and queue depth.
    pub fn new(format: FrameFormat, queue_depth: usize) -> Self {
        Self {
            format,
            inner: Arc::new(StillInner {
                pool: SlotPool::new(queue_depth),
                queue: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// Returns the still format.
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Platform side: queues a newly produced frame.
    ///
    /// Fails with [`QueueFull`] when every slot is held, which stalls
    /// production upstream without corrupting queued frames.
    pub fn produce(&self, bytes: Vec<u8>) -> Result<(), QueueFull> {
        let slot = self.inner.pool.try_acquire().ok_or(QueueFull)?;
        let frame = CapturedFrame::new(bytes, slot);
        let mut queue = self.lock_queue();
        queue.push_back(frame);
        trace!(queued = queue.len(), "still frame produced");
        Ok(())
    }

    /// Consumer side: takes the newest queued frame.
    ///
    /// Older queued frames are discarded, returning their slots, so the
    /// consumer always sees the latest capture. Returns `None` when the
    /// queue is empty.
    pub fn acquire_latest(&self) -> Option<CapturedFrame> {
        let mut queue = self.lock_queue();
        let newest = queue.pop_back();
        if !queue.is_empty() {
            debug!(discarded = queue.len(), "discarding stale still frames");
            queue.clear();
        }
        newest
    }

    /// Returns the number of free frame slots.
    pub fn free_slots(&self) -> usize {
        self.inner.pool.free_slots()
    }

    /// Returns the queue depth this target was created with.
    pub fn queue_depth(&self) -> usize {
        self.inner.pool.capacity()
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<CapturedFrame>> {
        self.inner.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}
