//! Run context: everything the producer and workers of one run share. Built in
//! [`PipelineController::start`](super::PipelineController::start) and read-only afterwards.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::cancel::CancelToken;
use super::events::Reporter;
use super::results::ResultAggregator;
use crate::{ReferenceVector, Settings};

/// Shared "stopping" flag of one run. Goes false → true only; each run gets a fresh one.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    stopping: Arc<AtomicBool>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stopping.store(true, Ordering::SeqCst);
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }
}

/// Shared context for one run cycle, passed (in an `Arc`) to the producer and every worker.
pub struct RunContext {
    /// Scan root as configured (not canonicalized; a missing root is reported on every scan).
    pub root: PathBuf,
    pub include: String,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub top_k: usize,
    pub rescan_delay: Duration,
    pub single_pass: bool,
    pub worker_count: usize,
    /// Set only when similarity mode is on for this run.
    pub reference: Option<Arc<ReferenceVector>>,
    pub state: RunState,
    /// Cancelled by `stop()` (and by shutdown). Interrupts the walk's puts and the idle sleep.
    pub stop: CancelToken,
    /// Cancelled by `shutdown()` only. Bounds worker takes and sentinel puts.
    pub shutdown: CancelToken,
    pub results: ResultAggregator,
    pub reporter: Reporter,
}

impl RunContext {
    pub fn new(
        settings: &Settings,
        reference: Option<Arc<ReferenceVector>>,
        shutdown: &CancelToken,
        results: ResultAggregator,
        reporter: Reporter,
    ) -> Self {
        Self {
            root: settings.root.clone(),
            include: settings.include.clone(),
            exclude: settings.exclude.clone(),
            follow_links: settings.follow_links,
            top_k: settings.top_k,
            rescan_delay: settings.rescan_delay,
            single_pass: settings.single_pass,
            worker_count: settings.worker_count(),
            reference,
            state: RunState::new(),
            stop: shutdown.child(),
            shutdown: shutdown.clone(),
            results,
            reporter,
        }
    }

    /// Producer's terminal condition: stop requested or the whole pipeline is going down.
    pub fn should_stop(&self) -> bool {
        self.state.is_stopping() || self.shutdown.is_cancelled()
    }
}
