//! Photograph persistence.
//!
//! Turns a completed still frame into a JPEG file on disk and tells
//! the external media indexer about it. Write failures cost exactly
//! the one photograph: the session and preview keep running, and the
//! frame's queue slot is returned either way.

mod index;
mod writer;

pub use index::{MediaIndex, NullMediaIndex};
pub use writer::{PersistError, PhotoWriter};
