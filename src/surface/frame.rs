//! Captured frames and the slot pool that bounds them.

use std::sync::{Arc, Mutex};

/// Bounded pool of frame slots backing the still-capture target.
///
/// Each in-flight [`CapturedFrame`] holds one slot; the slot returns to
/// the pool when the frame is dropped. When every slot is held, frame
/// production fails upstream rather than growing the queue.
#[derive(Debug)]
pub struct SlotPool {
    capacity: usize,
    in_use: Mutex<usize>,
}

impl SlotPool {
    /// Creates a pool with the given number of slots.
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity,
            in_use: Mutex::new(0),
        })
    }

    /// Attempts to take a slot, returning `None` when all are held.
    pub fn try_acquire(self: &Arc<Self>) -> Option<SlotGuard> {
        let mut in_use = lock(&self.in_use);
        if *in_use >= self.capacity {
            return None;
        }
        *in_use += 1;
        Some(SlotGuard {
            pool: Arc::clone(self),
        })
    }

    /// Returns the number of slots currently free.
    pub fn free_slots(&self) -> usize {
        self.capacity - *lock(&self.in_use)
    }

    /// Returns the total slot count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn release(&self) {
        let mut in_use = lock(&self.in_use);
        debug_assert!(*in_use > 0, "slot released more often than acquired");
        *in_use = in_use.saturating_sub(1);
    }
}

fn lock(mutex: &Mutex<usize>) -> std::sync::MutexGuard<'_, usize> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Ownership of one slot in a [`SlotPool`]; released on drop.
#[derive(Debug)]
pub struct SlotGuard {
    pool: Arc<SlotPool>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.pool.release();
    }
}

/// A single still frame produced by the capture target.
///
/// Owns one encoded buffer and one queue slot. The slot returns to the
/// pool when the frame is dropped, so every exit path of a consumer —
/// write success or write failure — releases it exactly once.
#[derive(Debug)]
pub struct CapturedFrame {
    bytes: Vec<u8>,
    _slot: SlotGuard,
}

impl CapturedFrame {
    pub(crate) fn new(bytes: Vec<u8>, slot: SlotGuard) -> Self {
        Self { bytes, _slot: slot }
    }

    /// Returns the frame's raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the buffer length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_exhausts_and_recovers() {
        let pool = SlotPool::new(2);
        let a = pool.try_acquire().expect("slot a");
        let _b = pool.try_acquire().expect("slot b");
        assert!(pool.try_acquire().is_none());
        assert_eq!(pool.free_slots(), 0);

        drop(a);
        assert_eq!(pool.free_slots(), 1);
        assert!(pool.try_acquire().is_some());
    }

    #[test]
    fn test_frame_drop_releases_slot_once() {
        let pool = SlotPool::new(1);
        let slot = pool.try_acquire().expect("slot");
        let frame = CapturedFrame::new(vec![0xFF, 0xD8], slot);
        assert_eq!(pool.free_slots(), 0);
        assert_eq!(frame.len(), 2);

        drop(frame);
        assert_eq!(pool.free_slots(), 1);
    }
}
