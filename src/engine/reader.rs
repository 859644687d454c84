//! Parallel reader pool
//!
//! Every discovered regular file becomes one job on a bounded rayon pool.
//! Jobs queue without limit; at most `jobs` reads execute at once. Each job
//! holds a clone of its root's sender, which keeps that root's stream open
//! until the read has delivered its result.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::trace;

use crate::core::error::CollectError;
use crate::core::file_reader::{read_file_with_config, FileReadConfig};
use crate::core::model::FileResult;
use crate::engine::CancelFlag;

/// Producer side of one root's output stream.
///
/// Cloned into every read scheduled for the root; the stream closes when the
/// last clone is dropped.
#[derive(Debug, Clone)]
pub struct RootSink {
    root: usize,
    tx: Sender<FileResult>,
    in_flight: Arc<AtomicUsize>,
}

impl RootSink {
    pub fn new(root: usize, tx: Sender<FileResult>) -> Self {
        Self {
            root,
            tx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Send one result. Returns false once the consumer has gone away.
    pub fn emit(&self, result: FileResult) -> bool {
        self.tx.send(result).is_ok()
    }

    /// Reads scheduled for this root that have not finished yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Bounded pool executing file reads
pub struct ReaderPool {
    pool: ThreadPool,
    config: FileReadConfig,
    cancel: CancelFlag,
}

impl ReaderPool {
    pub fn new(
        jobs: usize,
        config: FileReadConfig,
        cancel: CancelFlag,
    ) -> Result<Self, CollectError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("reader-{}", i))
            .build()
            .map_err(|e| CollectError::Spawn(e.to_string()))?;

        Ok(Self {
            pool,
            config,
            cancel,
        })
    }

    /// Schedule a read of `path`; exactly one result goes to `sink` unless
    /// the run was cancelled before the job started.
    pub fn submit(&self, sink: &RootSink, path: PathBuf) {
        let sink = sink.clone();
        let cancel = self.cancel.clone();
        let config = self.config;

        sink.in_flight.fetch_add(1, Ordering::SeqCst);
        self.pool.spawn(move || {
            if cancel.is_cancelled() {
                trace!(path = %path.display(), "read skipped after cancel");
            } else {
                let outcome = read_file_with_config(&path, &config);
                sink.emit(FileResult {
                    root: sink.root,
                    path,
                    outcome,
                });
            }
            sink.in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }
}
