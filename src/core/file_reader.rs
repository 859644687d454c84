//! File reading for the reader pool
//!
//! Reads a whole file into memory, optionally refusing files above a size
//! limit. Content is returned as raw bytes; no encoding handling is applied.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::core::error::CollectError;

/// Configuration for file reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReadConfig {
    /// Maximum file size to accept (bytes); `None` reads any size
    pub max_file_size: Option<u64>,
}

/// Read the full contents of `path`.
pub fn read_file_with_config(path: &Path, config: &FileReadConfig) -> Result<Vec<u8>, CollectError> {
    let read_err = |source| CollectError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(read_err)?;
    let file_size = file.metadata().map_err(read_err)?.len();

    if let Some(limit) = config.max_file_size {
        if file_size > limit {
            return Err(CollectError::FileTooLarge {
                path: path.to_path_buf(),
                size: file_size,
                limit,
            });
        }
    }

    let mut buffer = Vec::with_capacity(file_size as usize);
    let mut reader = std::io::BufReader::new(file);
    match config.max_file_size {
        // Metadata understates growing and virtual files; cap the read too.
        Some(limit) => {
            reader
                .by_ref()
                .take(limit.saturating_add(1))
                .read_to_end(&mut buffer)
                .map_err(read_err)?;
            if buffer.len() as u64 > limit {
                return Err(CollectError::FileTooLarge {
                    path: path.to_path_buf(),
                    size: buffer.len() as u64,
                    limit,
                });
            }
        }
        None => {
            reader.read_to_end(&mut buffer).map_err(read_err)?;
        }
    }

    Ok(buffer)
}
