//! Root classification

use std::fs;
use std::path::Path;

use crate::core::error::CollectError;

/// What a caller-supplied root turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// A regular file; read directly, no walk
    File,
    Directory,
}

/// Classify `root`. Follows a symlink at the root itself, nothing below it.
pub fn probe(root: &Path) -> Result<RootKind, CollectError> {
    let metadata =
        fs::metadata(root).map_err(|e| CollectError::from_root_stat(root.to_path_buf(), e))?;

    if metadata.is_dir() {
        Ok(RootKind::Directory)
    } else if metadata.is_file() {
        Ok(RootKind::File)
    } else {
        Err(CollectError::UnsupportedRoot {
            path: root.to_path_buf(),
        })
    }
}
