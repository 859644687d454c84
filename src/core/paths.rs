//! Path normalization utilities
//!
//! Turns a discovered filesystem path into a map key. Keys are lexically
//! cleaned (`.` dropped, `..` folded into its parent) and always use '/' as
//! separator regardless of platform.

use std::path::{Component, Path, PathBuf};

use crate::core::error::CollectError;

/// How map keys are derived from discovered paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// The path exactly as discovered (root as given, joined with the entry)
    #[default]
    Raw,
    /// Absolute path, made absolute against the current directory
    Absolute,
    /// Path relative to the single root; a file root keys by its file name
    Relative,
}

impl std::str::FromStr for KeyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(KeyMode::Raw),
            "abs" | "absolute" => Ok(KeyMode::Absolute),
            "rel" | "relative" => Ok(KeyMode::Relative),
            _ => Err(format!("Unknown key mode: {}", s)),
        }
    }
}

impl KeyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMode::Raw => "raw",
            KeyMode::Absolute => "absolute",
            KeyMode::Relative => "relative",
        }
    }
}

/// Derives collection keys for one run.
///
/// Holds the roots so `Relative` keys can be computed per result.
#[derive(Debug, Clone)]
pub struct KeyNormalizer {
    mode: KeyMode,
    roots: Vec<PathBuf>,
}

impl KeyNormalizer {
    pub fn new(mode: KeyMode, roots: &[PathBuf]) -> Self {
        Self {
            mode,
            roots: roots.to_vec(),
        }
    }

    /// Key for `path`, discovered under the root at index `root`.
    pub fn key(&self, path: &Path, root: usize) -> Result<String, CollectError> {
        match self.mode {
            KeyMode::Raw => Ok(normalize_path(&clean_path(path))),
            KeyMode::Absolute => {
                let abs = std::path::absolute(path).map_err(|source| CollectError::KeyResolve {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(normalize_path(&clean_path(&abs)))
            }
            KeyMode::Relative => {
                let root_path = self.roots.get(root).map(PathBuf::as_path).unwrap_or(path);
                match make_relative(path, root_path) {
                    Some(rel) if !rel.is_empty() => Ok(rel),
                    // The root itself is the file
                    _ => Ok(path
                        .file_name()
                        .map(|name| normalize_path(Path::new(name)))
                        .unwrap_or_else(|| normalize_path(path))),
                }
            }
        }
    }
}

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lexically clean a path: drop `.` components and fold `..` into the
/// preceding normal component. No filesystem access, symlinks are not
/// resolved. `..` directly under the root directory is dropped; leading `..`
/// of a relative path is kept. An empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.into_iter().collect()
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}
