//! Collector - the fail-fast consumer of the unified stream
//!
//! Drains results one at a time, so the Collection needs no lock. The first
//! error ends the run: the partial Collection is dropped and the shared
//! cancel flag stops walkers and queued reads. Reads already executing finish
//! and their results are discarded.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::CollectError;
use crate::core::model::{CollectConfig, Collection, FileResult, Insertion};
use crate::core::paths::KeyNormalizer;
use crate::engine::{start, CancelFlag};

/// Collect every regular file under `roots` into one Collection.
///
/// Usage errors are reported before any filesystem access.
pub fn collect<P: AsRef<Path>>(roots: &[P], config: &CollectConfig) -> Result<Collection, CollectError> {
    config.validate(roots)?;
    let roots: Vec<PathBuf> = roots.iter().map(|r| r.as_ref().to_path_buf()).collect();

    let cancel = CancelFlag::new();
    let _guard = cancel.guard();

    let stream = start(&roots, config, cancel)?;
    let keys = KeyNormalizer::new(config.key_mode, &roots);
    drain(stream, &keys, config.strict)
}

/// Build a Collection from a result stream, stopping at the first error.
pub fn drain<I>(stream: I, keys: &KeyNormalizer, strict: bool) -> Result<Collection, CollectError>
where
    I: IntoIterator<Item = FileResult>,
{
    let mut collection = Collection::new();

    for FileResult {
        root,
        path,
        outcome,
    } in stream
    {
        let content = match outcome {
            Ok(content) => content,
            Err(e) => {
                debug!(root, path = %path.display(), "aborting on first error");
                return Err(e);
            }
        };

        let key = keys.key(&path, root)?;
        match collection.insert(key, root, path, content, strict)? {
            Insertion::Added => {}
            Insertion::Replaced => debug!(root, "key overwritten by later result"),
            Insertion::Kept => debug!(root, "key already held by a later root"),
        }
    }

    info!(
        entries = collection.len(),
        bytes = collection.total_bytes(),
        "collection complete"
    );
    Ok(collection)
}
