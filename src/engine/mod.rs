//! Engine module - Concurrent traversal and aggregation
//!
//! Architecture:
//! ```text
//! roots ──┬── walker-0: probe → walk → submit reads ─┐
//!         │                                          ├── reader pool (rayon) ──> per-root channel
//!         └── walker-N: probe → walk → submit reads ─┘
//!
//! per-root channels ──> FanIn (select over all open receivers) ──> collector
//! ```
//!
//! A root's channel disconnects only once its walker and every read it
//! scheduled have dropped their sender clones, so the unified stream ends
//! exactly when all work is done.
//!
//! Provides:
//! - probe: classify a root before traversal
//! - walker: sequential directory walk (walkdir, symlinks not followed)
//! - reader: bounded reader pool and per-root sinks
//! - fanin: merge per-root streams into one
//! - collect: fail-fast consumer building the Collection

pub mod collect;
pub mod fanin;
pub mod probe;
pub mod reader;
pub mod walker;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use tracing::debug;

use crate::core::error::CollectError;
use crate::core::file_reader::FileReadConfig;
use crate::core::model::{CollectConfig, FileResult};
use crate::engine::fanin::FanIn;
use crate::engine::probe::{probe, RootKind};
use crate::engine::reader::{ReaderPool, RootSink};
use crate::engine::walker::walk_directory;

pub use collect::collect;

/// Shared flag telling walkers and queued reads to stop.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Guard that cancels when dropped
    pub fn guard(&self) -> CancelGuard {
        CancelGuard(self.clone())
    }
}

/// Cancels its flag on drop, covering early returns from the consumer.
#[derive(Debug)]
pub struct CancelGuard(CancelFlag);

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Start one walker thread per root and return the unified result stream.
///
/// Roots are processed independently; results arrive in no particular order.
pub fn start(
    roots: &[PathBuf],
    config: &CollectConfig,
    cancel: CancelFlag,
) -> Result<FanIn, CollectError> {
    let read_config = FileReadConfig {
        max_file_size: config.max_file_size,
    };
    let pool = Arc::new(ReaderPool::new(config.jobs, read_config, cancel.clone())?);

    let mut receivers = Vec::with_capacity(roots.len());
    for (index, root) in roots.iter().enumerate() {
        let (tx, rx) = unbounded::<FileResult>();
        receivers.push(rx);

        let sink = RootSink::new(index, tx);
        let root = root.clone();
        let pool = Arc::clone(&pool);
        let walker_cancel = cancel.clone();

        let spawned = thread::Builder::new()
            .name(format!("walker-{}", index))
            .spawn(move || scan_root(root, sink, &pool, &walker_cancel));
        if let Err(e) = spawned {
            cancel.cancel();
            return Err(CollectError::Spawn(e.to_string()));
        }
    }

    debug!(
        roots = roots.len(),
        jobs = config.jobs,
        keys = config.key_mode.as_str(),
        "engine started"
    );
    Ok(FanIn::new(receivers).with_pool(pool))
}

/// Probe one root and feed its files into the reader pool.
fn scan_root(root: PathBuf, sink: RootSink, pool: &ReaderPool, cancel: &CancelFlag) {
    match probe(&root) {
        Err(e) => {
            debug!(root = %root.display(), "root probe failed");
            sink.emit(FileResult::error(sink.root(), &root, e));
        }
        Ok(RootKind::File) => {
            debug!(root = %root.display(), "root is a single file");
            pool.submit(&sink, root);
        }
        Ok(RootKind::Directory) => {
            let summary = walk_directory(&root, &sink, pool, cancel);
            debug!(
                root = %root.display(),
                files = summary.files,
                dirs = summary.dirs,
                skipped = summary.skipped,
                errors = summary.errors,
                in_flight = sink.in_flight(),
                "walk finished"
            );
        }
    }
}
