//! Directory walker
//!
//! One thread walks one tree sequentially with walkdir. Directories are
//! descended but never emitted, symlinks and special files are skipped, and
//! regular files are handed to the reader pool instead of being read inline.

use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use crate::core::error::CollectError;
use crate::core::model::FileResult;
use crate::engine::reader::{ReaderPool, RootSink};
use crate::engine::CancelFlag;

/// Counts from one directory walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Regular files submitted for reading
    pub files: usize,
    /// Directories entered, including the root
    pub dirs: usize,
    /// Symlinks and special files ignored
    pub skipped: usize,
    /// Directory listing failures emitted
    pub errors: usize,
}

/// Walk `root`, submitting every regular file below it to `pool`.
///
/// A directory that cannot be listed yields one error result and is not
/// descended; its siblings are still walked. Stops early when `cancel` is set
/// or the consumer has gone away.
pub fn walk_directory(
    root: &Path,
    sink: &RootSink,
    pool: &ReaderPool,
    cancel: &CancelFlag,
) -> WalkSummary {
    let mut summary = WalkSummary::default();

    for entry in WalkDir::new(root).follow_links(false) {
        if cancel.is_cancelled() {
            trace!(root = %root.display(), "walk cancelled");
            break;
        }

        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                summary.errors += 1;
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"));
                let error = CollectError::DirectoryList { path, source };
                if !sink.emit(FileResult::error(sink.root(), root, error)) {
                    break;
                }
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            summary.dirs += 1;
        } else if file_type.is_file() {
            summary.files += 1;
            pool.submit(sink, entry.into_path());
        } else {
            // symlink, fifo, socket, device
            trace!(path = %entry.path().display(), "skipping non-regular entry");
            summary.skipped += 1;
        }
    }

    summary
}
