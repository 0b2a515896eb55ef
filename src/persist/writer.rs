//! Writing captured frames to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};

use super::index::MediaIndex;
use crate::session::StatusSink;
use crate::surface::CapturedFrame;

/// Errors from persisting a photograph.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write photo: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes completed frames into the pictures directory.
pub struct PhotoWriter<M: MediaIndex> {
    dir: PathBuf,
    index: M,
}

impl<M: MediaIndex> PhotoWriter<M> {
    /// Creates a writer targeting the given directory.
    ///
    /// The directory is created on first write, not here.
    pub fn new(dir: impl Into<PathBuf>, index: M) -> Self {
        Self {
            dir: dir.into(),
            index,
        }
    }

    /// Returns the target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists a completed still frame.
    ///
    /// The filename is `selfie_<epoch-millis>.jpg`; two captures within
    /// the same millisecond share a name and the later one wins. The
    /// directory is created if missing, the frame's encoded bytes are
    /// written verbatim, and on success the media indexer is notified
    /// with the absolute path and a transient notification is shown.
    /// On failure the error is reported through the sink and the
    /// capture is lost; nothing is retried.
    ///
    /// Consumes the frame, so its queue slot is returned on every path.
    pub fn on_frame_ready<S: StatusSink>(
        &self,
        frame: CapturedFrame,
        sink: &S,
    ) -> Result<PathBuf, PersistError> {
        let result = self.write(&frame);
        match &result {
            Ok(path) => {
                info!(path = %path.display(), bytes = frame.len(), "image captured");
                self.index.file_written(path);
                sink.notify("Photo captured");
            }
            Err(e) => {
                error!(error = %e, "failed to persist photo");
                sink.show_error(&e.to_string());
            }
        }
        result
    }

    fn write(&self, frame: &CapturedFrame) -> Result<PathBuf, PersistError> {
        let filename = format!("selfie_{}.jpg", Utc::now().timestamp_millis());
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, frame.bytes())?;
        let absolute = path.canonicalize().unwrap_or(path);
        Ok(absolute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FrameFormat;
    use crate::persist::NullMediaIndex;
    use crate::session::RecordingSink;
    use crate::surface::StillTarget;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingIndex {
        paths: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl RecordingIndex {
        fn paths(&self) -> Vec<PathBuf> {
            self.paths.lock().expect("index lock").clone()
        }
    }

    impl MediaIndex for RecordingIndex {
        fn file_written(&self, path: &Path) {
            self.paths.lock().expect("index lock").push(path.to_owned());
        }
    }

    fn frame_with(bytes: &[u8]) -> (StillTarget, CapturedFrame) {
        let still = StillTarget::new(FrameFormat::jpeg(640, 480), 2);
        still.produce(bytes.to_vec()).expect("produce");
        let frame = still.acquire_latest().expect("frame");
        (still, frame)
    }

    #[test]
    fn test_writes_bytes_verbatim_with_timestamped_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index = RecordingIndex::default();
        let writer = PhotoWriter::new(dir.path().join("Selfie"), index.clone());
        let sink = RecordingSink::new();

        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let (still, frame) = frame_with(&bytes);

        let path = writer.on_frame_ready(frame, &sink).expect("persist");
        assert_eq!(fs::read(&path).expect("read back"), bytes);

        let name = path.file_name().expect("name").to_string_lossy().into_owned();
        assert!(name.starts_with("selfie_") && name.ends_with(".jpg"), "{name}");
        let millis: i64 = name["selfie_".len()..name.len() - ".jpg".len()]
            .parse()
            .expect("epoch millis");
        assert!(millis > 0);

        // Success path: slot released, indexer and notification fired.
        assert_eq!(still.free_slots(), 2);
        assert_eq!(index.paths(), vec![path]);
        assert_eq!(sink.notices(), vec!["Photo captured"]);
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn test_directory_is_created_idempotently() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("Pictures").join("Selfie");
        let writer = PhotoWriter::new(&target, NullMediaIndex);
        let sink = RecordingSink::new();

        let (_still, first) = frame_with(&[0xFF, 0xD8]);
        writer.on_frame_ready(first, &sink).expect("first write");
        let (_still, second) = frame_with(&[0xFF, 0xD8]);
        writer.on_frame_ready(second, &sink).expect("second write");

        assert!(target.is_dir());
    }

    #[test]
    fn test_write_failure_reports_and_still_releases_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A plain file where the pictures directory should be makes
        // create_dir_all fail.
        let blocker = dir.path().join("Selfie");
        fs::write(&blocker, b"not a directory").expect("blocker");

        let writer = PhotoWriter::new(&blocker, NullMediaIndex);
        let sink = RecordingSink::new();
        let (still, frame) = frame_with(&[0xFF, 0xD8]);

        let result = writer.on_frame_ready(frame, &sink);
        assert!(matches!(result, Err(PersistError::Io(_))));
        assert_eq!(still.free_slots(), 2);
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.notices().is_empty());
    }
}
