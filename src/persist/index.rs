//! Media-index collaborator.

use std::path::Path;

use tracing::debug;

/// External media indexer notified after each successful write.
///
/// Fire-and-forget: no acknowledgment is expected, and the pipeline
/// never reads back through this collaborator.
pub trait MediaIndex {
    /// A photograph was written to the given absolute path.
    fn file_written(&self, path: &Path);
}

/// A media index that only logs, for setups without gallery tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMediaIndex;

impl MediaIndex for NullMediaIndex {
    fn file_written(&self, path: &Path) {
        debug!(path = %path.display(), "media index notified");
    }
}
