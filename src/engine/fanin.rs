//! Fan-in of per-root result streams
//!
//! Waits on every open receiver at once and yields whichever result is ready
//! first, so a slow root never holds back a fast one. A receiver is dropped
//! from the set once its root has disconnected; the merged stream ends when
//! the set is empty.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Select};
use tracing::debug;

use crate::core::model::FileResult;
use crate::engine::reader::ReaderPool;

/// Unified stream over all roots. Pure merge: results are passed through
/// untouched, errors included.
pub struct FanIn {
    /// (root index, receiver) for every root still open
    open: Vec<(usize, Receiver<FileResult>)>,
    delivered: usize,
    /// Keeps the reader pool alive while reads can still deliver
    _pool: Option<Arc<ReaderPool>>,
}

impl FanIn {
    /// Receiver `i` is taken to belong to root `i`.
    pub fn new(receivers: Vec<Receiver<FileResult>>) -> Self {
        Self {
            open: receivers.into_iter().enumerate().collect(),
            delivered: 0,
            _pool: None,
        }
    }

    pub fn with_pool(mut self, pool: Arc<ReaderPool>) -> Self {
        self._pool = Some(pool);
        self
    }
}

#[cfg(test)]
impl FanIn {
    /// Roots whose streams have not closed yet
    pub fn open_roots(&self) -> usize {
        self.open.len()
    }
}

impl Iterator for FanIn {
    type Item = FileResult;

    fn next(&mut self) -> Option<FileResult> {
        while !self.open.is_empty() {
            let (slot, received) = {
                let mut select = Select::new();
                for (_, rx) in &self.open {
                    select.recv(rx);
                }
                let op = select.select();
                let slot = op.index();
                (slot, op.recv(&self.open[slot].1))
            };

            match received {
                Ok(result) => {
                    self.delivered += 1;
                    return Some(result);
                }
                Err(_) => {
                    let (root, _) = self.open.swap_remove(slot);
                    debug!(root, remaining = self.open.len(), "root stream drained");
                }
            }
        }

        debug!(delivered = self.delivered, "all root streams drained");
        None
    }
}
