//! Error types for filemap
//!
//! Every failure the engine can observe is a `CollectError`. Traversal and
//! read failures travel as data inside a `FileResult` so the single draining
//! consumer sees them no matter which thread produced them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    /// A caller-supplied root does not exist
    #[error("{}: no such file or directory", path.display())]
    RootNotFound { path: PathBuf },

    /// Stat on a caller-supplied root failed for another reason
    #[error("{}: cannot stat root: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root is neither a regular file nor a directory
    #[error("{}: not a regular file or directory", path.display())]
    UnsupportedRoot { path: PathBuf },

    /// A directory below a root could not be listed
    #[error("{}: cannot list directory: {source}", path.display())]
    DirectoryList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered regular file could not be read
    #[error("{}: cannot read file: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The absolute form of a discovered path could not be determined
    #[error("{}: cannot resolve absolute path: {source}", path.display())]
    KeyResolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: file is {size} bytes, limit is {limit}", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Two discovered files normalized to the same key under `--strict`
    #[error("key {key:?} produced by both {} and {}", first.display(), second.display())]
    KeyCollision {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Bad invocation, detected before any traversal starts
    #[error("{0}")]
    Usage(String),

    /// Worker thread or reader pool could not be started
    #[error("failed to start worker: {0}")]
    Spawn(String),
}

impl CollectError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::RootNotFound { path }
            | Self::RootUnreadable { path, .. }
            | Self::UnsupportedRoot { path }
            | Self::DirectoryList { path, .. }
            | Self::FileRead { path, .. }
            | Self::KeyResolve { path, .. }
            | Self::FileTooLarge { path, .. } => Some(path),
            Self::KeyCollision { second, .. } => Some(second),
            Self::Usage(_) | Self::Spawn(_) => None,
        }
    }

    /// Whether this error stems from how the tool was invoked.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Map a failed stat on a root to the matching variant.
    pub(crate) fn from_root_stat(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::RootNotFound { path }
        } else {
            Self::RootUnreadable { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_root_stat_not_found() {
        let err = CollectError::from_root_stat(
            PathBuf::from("missing"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, CollectError::RootNotFound { .. }));
        assert_eq!(err.to_string(), "missing: no such file or directory");
    }

    #[test]
    fn test_root_stat_other() {
        let err = CollectError::from_root_stat(
            PathBuf::from("locked"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CollectError::RootUnreadable { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("locked")));
    }

    #[test]
    fn test_usage_has_no_path() {
        let err = CollectError::Usage("no roots".into());
        assert!(err.is_usage());
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "no roots");
    }

    #[test]
    fn test_collision_message() {
        let err = CollectError::KeyCollision {
            key: "a/b".into(),
            first: PathBuf::from("x/a/b"),
            second: PathBuf::from("y/a/b"),
        };
        assert!(!err.is_usage());
        assert!(err.to_string().contains("\"a/b\""));
    }
}
