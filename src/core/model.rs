//! Data model shared by the engine, the collector and the renderer
//!
//! - `FileResult`: one outcome flowing out of the engine
//! - `Collection`: the finished key -> content mapping
//! - `ManifestEntry`: the serializable view used by json/jsonl output

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::error::CollectError;
use crate::core::paths::KeyMode;
use crate::core::util::{hash_bytes, HashAlgorithm};

/// Outcome of discovering and reading one file.
///
/// `outcome` is either the full content or the error raised by stat,
/// directory listing or read. Never mutated after creation.
#[derive(Debug)]
pub struct FileResult {
    /// Index of the caller-supplied root that produced this result
    pub root: usize,

    /// Path as discovered, before key normalization
    pub path: PathBuf,

    pub outcome: Result<Vec<u8>, CollectError>,
}

impl FileResult {
    /// Error carrier. The path is taken from the error when it has one.
    pub fn error(root: usize, fallback: &Path, error: CollectError) -> Self {
        let path = error
            .path()
            .cloned()
            .unwrap_or_else(|| fallback.to_path_buf());
        Self {
            root,
            path,
            outcome: Err(error),
        }
    }
}

#[cfg(test)]
impl FileResult {
    pub fn content(root: usize, path: PathBuf, content: Vec<u8>) -> Self {
        Self {
            root,
            path,
            outcome: Ok(content),
        }
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

/// What happened when a result was inserted into a `Collection`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Key was not present
    Added,
    /// Key was present and the new content replaced it
    Replaced,
    /// Key was present and the existing content took precedence
    Kept,
}

#[derive(Debug)]
struct Slot {
    root: usize,
    path: PathBuf,
    content: Vec<u8>,
}

/// Unique-keyed mapping from normalized path to file content.
///
/// Collisions resolve by root order: content from a root later in the
/// argument list wins over an earlier one. Two files from the same root that
/// normalize to the same key keep whichever arrived last, which depends on
/// read scheduling. With `strict`, any collision is an error instead.
#[derive(Debug, Default)]
pub struct Collection {
    entries: BTreeMap<String, Slot>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: String,
        root: usize,
        path: PathBuf,
        content: Vec<u8>,
        strict: bool,
    ) -> Result<Insertion, CollectError> {
        let slot = Slot {
            root,
            path,
            content,
        };
        let mut occupied = match self.entries.entry(key) {
            Entry::Vacant(vacant) => {
                vacant.insert(slot);
                return Ok(Insertion::Added);
            }
            Entry::Occupied(occupied) => occupied,
        };

        if strict {
            return Err(CollectError::KeyCollision {
                key: occupied.key().clone(),
                first: occupied.get().path.clone(),
                second: slot.path,
            });
        }

        if occupied.get().root > slot.root {
            return Ok(Insertion::Kept);
        }

        occupied.insert(slot);
        Ok(Insertion::Replaced)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(key, slot)| (key.as_str(), slot.content.as_slice()))
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries
            .values()
            .map(|slot| slot.content.len() as u64)
            .sum()
    }
}

#[cfg(test)]
impl Collection {
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|slot| slot.content.as_slice())
    }
}

/// Options governing one collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectConfig {
    /// How map keys are derived from discovered paths
    pub key_mode: KeyMode,

    /// Number of reader threads
    pub jobs: usize,

    /// Treat key collisions as errors
    pub strict: bool,

    /// Reject files larger than this many bytes
    pub max_file_size: Option<u64>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            key_mode: KeyMode::default(),
            jobs: default_jobs(),
            strict: false,
            max_file_size: None,
        }
    }
}

impl CollectConfig {
    /// Check the configuration against the supplied roots before any I/O.
    pub fn validate<P: AsRef<Path>>(&self, roots: &[P]) -> Result<(), CollectError> {
        if roots.is_empty() {
            return Err(CollectError::Usage("at least one path is required".into()));
        }
        if let Some(empty) = roots.iter().position(|r| r.as_ref().as_os_str().is_empty()) {
            return Err(CollectError::Usage(format!(
                "path argument {} is empty",
                empty + 1
            )));
        }
        if self.key_mode == KeyMode::Relative && roots.len() != 1 {
            return Err(CollectError::Usage(format!(
                "relative keys need exactly one path, got {}",
                roots.len()
            )));
        }
        if self.jobs == 0 {
            return Err(CollectError::Usage("jobs must be at least 1".into()));
        }
        Ok(())
    }
}

/// Logical CPU count, with a fallback.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// File content as it appears in json/jsonl output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

impl Content {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Content::Text(text.to_string()),
            Err(_) => Content::Bytes(bytes.to_vec()),
        }
    }
}

/// One collection entry for manifest output
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub key: String,
    pub size: u64,
    pub hash: String,
    pub content: Content,
}

impl ManifestEntry {
    pub fn new(key: &str, content: &[u8], algorithm: HashAlgorithm) -> Self {
        Self {
            key: key.to_string(),
            size: content.len() as u64,
            hash: hash_bytes(content, algorithm),
            content: Content::from_bytes(content),
        }
    }
}
