//! Pipeline lifecycle and the control surface used by front-ends.
//!
//! One run = 1 producer thread + K worker threads sharing a fresh bounded queue. `stop()` is
//! cooperative (workers drain what is queued, then take their sentinel); `shutdown()` cancels
//! everything and joins every thread.

use crossbeam_channel::Receiver;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::cancel::CancelToken;
use super::context::{RunContext, RunState};
use super::events::{Event, Reporter};
use super::producer::run_producer;
use super::queue::WorkQueue;
use super::results::ResultAggregator;
use super::worker::run_worker;
use crate::engine::tools::display_name;
use crate::error::{ScanError, ScanResult};
use crate::text::tokenize_file;
use crate::{ReferenceVector, Settings, SimilarityResult};

/// Threads of the current run.
struct RunHandles {
    ctx: Arc<RunContext>,
    producer: JoinHandle<()>,
    workers: Vec<JoinHandle<usize>>,
}

/// Stops a run from another thread (e.g. a Ctrl+C handler). Same effect as
/// [`PipelineController::stop`].
#[derive(Clone, Debug)]
pub struct StopHandle {
    state: RunState,
    stop: CancelToken,
}

impl StopHandle {
    pub fn stop(&self) {
        self.state.request_stop();
        self.stop.cancel();
    }

    /// True once the run was stopped, finished and waited on, or replaced by a newer run.
    pub fn is_stopped(&self) -> bool {
        self.stop.is_cancelled()
    }
}

pub struct PipelineController {
    settings: Settings,
    reference: Option<Arc<ReferenceVector>>,
    similarity_mode: bool,
    /// Results of the latest run. Replaced on every `start()`, so workers of an older run that are
    /// still draining write into their own aggregator.
    results: ResultAggregator,
    reporter: Reporter,
    shutdown: CancelToken,
    run: Option<RunHandles>,
    /// Workers of earlier runs that may still be draining their queue.
    retired: Vec<JoinHandle<usize>>,
    runs_started: usize,
}

impl PipelineController {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            reference: None,
            similarity_mode: false,
            results: ResultAggregator::new(),
            reporter: Reporter::new(),
            shutdown: CancelToken::new(),
            run: None,
            retired: Vec::new(),
            runs_started: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Subscribe to the progress/log stream. Each subscriber receives every event emitted after it
    /// subscribed; nothing is buffered while nobody listens.
    pub fn events(&self) -> Receiver<Event> {
        self.reporter.subscribe()
    }

    pub fn reference(&self) -> Option<&ReferenceVector> {
        self.reference.as_deref()
    }

    pub fn similarity_mode(&self) -> bool {
        self.similarity_mode
    }

    /// Tokenize `path` (full vector) and keep it as the reference. On error nothing changes.
    pub fn select_reference_file(&mut self, path: &Path) -> ScanResult<()> {
        let canonical = path.canonicalize().map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vector = tokenize_file(&canonical)?;
        self.reporter.emit(Event::ReferenceLoaded {
            file: display_name(&canonical),
            words: vector.len(),
        });
        self.reference = Some(Arc::new(ReferenceVector {
            path: canonical,
            vector,
        }));
        Ok(())
    }

    /// Turn similarity mode on or off. Enabling without a reference file is rejected.
    pub fn set_similarity_mode(&mut self, enabled: bool) -> ScanResult<()> {
        if enabled && self.reference.is_none() {
            return Err(ScanError::NoReferenceFile);
        }
        self.similarity_mode = enabled;
        Ok(())
    }

    /// Launch a run. Refused while the previous producer is still alive.
    pub fn start(&mut self) -> ScanResult<()> {
        if self.shutdown.is_cancelled() {
            return Err(ScanError::ShutDown);
        }
        if let Some(run) = &self.run
            && !run.producer.is_finished()
        {
            return Err(ScanError::ProducerStillActive);
        }
        if self.similarity_mode && self.reference.is_none() {
            return Err(ScanError::NoReferenceFile);
        }
        self.retire_previous_run();
        self.results = ResultAggregator::new();

        let reference = self
            .similarity_mode
            .then(|| self.reference.clone())
            .flatten();
        let ctx = Arc::new(RunContext::new(
            &self.settings,
            reference,
            &self.shutdown,
            self.results.clone(),
            self.reporter.clone(),
        ));
        let queue = WorkQueue::bounded(self.settings.queue_capacity());
        self.runs_started += 1;
        let run_no = self.runs_started;
        info!(
            "Starting run {} on {} with {} workers (queue capacity {})",
            run_no,
            ctx.root.display(),
            ctx.worker_count,
            queue.capacity()
        );

        let producer = {
            let ctx = Arc::clone(&ctx);
            let queue = queue.clone();
            thread::Builder::new()
                .name(format!("producer-{run_no}"))
                .spawn(move || run_producer(ctx, queue))
                .map_err(ScanError::Spawn)?
        };

        let mut workers = Vec::with_capacity(ctx.worker_count);
        for i in 0..ctx.worker_count {
            let worker_ctx = Arc::clone(&ctx);
            let queue = queue.clone();
            let spawned = thread::Builder::new()
                .name(format!("worker-{run_no}-{i}"))
                .spawn(move || run_worker(worker_ctx, queue));
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    // Wind down what already started; shutdown() reaps it.
                    ctx.state.request_stop();
                    ctx.stop.cancel();
                    self.run = Some(RunHandles {
                        ctx,
                        producer,
                        workers,
                    });
                    return Err(ScanError::Spawn(err));
                }
            }
        }

        self.run = Some(RunHandles {
            ctx,
            producer,
            workers,
        });
        Ok(())
    }

    /// Ask the current run to stop. Idempotent; a no-op without a run.
    pub fn stop(&self) {
        if let Some(handle) = self.stop_handle() {
            debug!("Stop requested");
            handle.stop();
        }
    }

    /// Handle that stops the current run from another thread. None before the first `start()`.
    pub fn stop_handle(&self) -> Option<StopHandle> {
        self.run.as_ref().map(|run| StopHandle {
            state: run.ctx.state.clone(),
            stop: run.ctx.stop.clone(),
        })
    }

    /// True while any thread of the current run is alive.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|run| {
            !run.producer.is_finished() || run.workers.iter().any(|w| !w.is_finished())
        })
    }

    /// Block until the current run's producer and workers have exited. Returns the number of files
    /// the workers handled. Only returns once the run stops (single pass, `stop()` from another
    /// thread, or shutdown).
    pub fn wait(&mut self) -> ScanResult<usize> {
        let Some(run) = self.run.take() else {
            return Ok(0);
        };
        run.producer
            .join()
            .map_err(|_| ScanError::ThreadPanicked("producer".to_string()))?;
        run.ctx.stop.cancel();
        let mut handled = 0_usize;
        for worker in run.workers {
            handled += worker
                .join()
                .map_err(|_| ScanError::ThreadPanicked("worker".to_string()))?;
        }
        // Earlier runs already received their sentinels, so these exit once their queue is drained.
        for worker in self.retired.drain(..) {
            worker
                .join()
                .map_err(|_| ScanError::ThreadPanicked("worker".to_string()))?;
        }
        debug!("Run finished, {} files handled", handled);
        Ok(handled)
    }

    /// Similarity results of the latest run, best match first.
    pub fn sorted_results(&self) -> Vec<SimilarityResult> {
        self.results.sorted_snapshot()
    }

    /// Cancel everything and join every thread this controller spawned. Further `start()` calls
    /// are refused.
    pub fn shutdown(&mut self) {
        self.shutdown.cancel();
        if let Some(run) = self.run.take() {
            let _ = run.producer.join();
            self.retired.extend(run.workers);
        }
        for worker in self.retired.drain(..) {
            let _ = worker.join();
        }
        debug!("Pipeline shut down");
    }

    /// Move the finished run's workers aside (they may still be draining) and reap finished ones.
    /// The old run's stop token is cancelled so the shutdown token drops it from its children.
    fn retire_previous_run(&mut self) {
        if let Some(run) = self.run.take() {
            let _ = run.producer.join();
            run.ctx.stop.cancel();
            self.retired.extend(run.workers);
        }
        let (finished, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut self.retired)
            .into_iter()
            .partition(|w| w.is_finished());
        for worker in finished {
            let _ = worker.join();
        }
        self.retired = alive;
    }
}

impl Drop for PipelineController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
