//! Bounded work queue between the directory producer and the workers.
//!
//! Capacity is the backpressure: a full queue blocks `put`, so slow workers throttle the walk.

use crossbeam_channel::{Receiver, Sender, bounded, select};
use std::path::PathBuf;

use super::cancel::CancelToken;

/// One unit of work. `Sentinel` tells exactly one worker to exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileJob {
    Process(PathBuf),
    Sentinel,
}

/// Returned by a blocking queue call that was abandoned because its token was cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Bounded FIFO of [`FileJob`]. Clones share the same underlying channel.
#[derive(Clone)]
pub struct WorkQueue {
    tx: Sender<FileJob>,
    rx: Receiver<FileJob>,
    capacity: usize,
}

impl WorkQueue {
    /// Queue holding at most `capacity` jobs (minimum 1).
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = bounded::<FileJob>(capacity);
        Self { tx, rx, capacity }
    }

    /// Enqueue `job`, blocking while the queue is full. Returns `Err(Cancelled)` (dropping the job)
    /// as soon as `cancel` fires.
    pub fn put(&self, job: FileJob, cancel: &CancelToken) -> Result<(), Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        select! {
            send(self.tx, job) -> res => res.map_err(|_| Cancelled),
            recv(cancel.signal()) -> _ => Err(Cancelled),
        }
    }

    /// Dequeue the next job, blocking while the queue is empty. Returns `Err(Cancelled)` as soon
    /// as `cancel` fires.
    pub fn take(&self, cancel: &CancelToken) -> Result<FileJob, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        select! {
            recv(self.rx) -> job => job.map_err(|_| Cancelled),
            recv(cancel.signal()) -> _ => Err(Cancelled),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rx.is_full()
    }
}
