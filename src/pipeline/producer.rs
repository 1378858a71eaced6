//! Directory producer: walk the root, queue matching files, idle, rescan. On stop, send one
//! sentinel per worker and exit.

use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use walkdir::WalkDir;

use super::context::RunContext;
use super::events::Event;
use super::queue::{FileJob, WorkQueue};
use crate::engine::tools::{display_name, is_reference_file, should_scan};

/// How one scan ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Walk finished; number of files queued.
    Completed(usize),
    /// Walk abandoned because of stop or cancellation; number queued before that.
    Aborted(usize),
}

fn thread_name() -> String {
    thread::current().name().unwrap_or("producer").to_string()
}

/// Producer thread body.
///
/// Scanning → Idle → Scanning … until the run is stopping (or shut down). The only way out is
/// through [`send_sentinels`].
pub fn run_producer(ctx: Arc<RunContext>, queue: WorkQueue) {
    let name = thread_name();
    ctx.reporter.emit(Event::ProducerStarted { name: name.clone() });

    while !ctx.should_stop() {
        let outcome = scan_once(&ctx, &queue);
        debug!("{name}: scan {:?}", outcome);

        if ctx.single_pass && matches!(outcome, ScanOutcome::Completed(_)) {
            ctx.state.request_stop();
            break;
        }
        if ctx.should_stop() {
            break;
        }

        ctx.reporter.emit(Event::RescanScheduled {
            name: name.clone(),
            delay_secs: ctx.rescan_delay.as_secs(),
        });
        if !ctx.stop.sleep(ctx.rescan_delay) {
            ctx.reporter
                .emit(Event::IdleInterrupted { name: name.clone() });
        }
    }

    send_sentinels(&ctx, &queue, &name);
    ctx.reporter.emit(Event::ProducerStopped { name });
}

/// Put exactly one sentinel per worker. Only shutdown can interrupt these puts; an interrupted
/// put is reported and skipped, not retried.
fn send_sentinels(ctx: &RunContext, queue: &WorkQueue, name: &str) {
    for _ in 0..ctx.worker_count {
        if queue.put(FileJob::Sentinel, &ctx.shutdown).is_err() {
            ctx.reporter.emit(Event::SentinelSkipped {
                name: name.to_string(),
            });
        }
    }
    debug!("{name}: sentinels sent to {} workers", ctx.worker_count);
}

/// Walk `ctx.root` once and queue every matching file. A missing root is reported and counts as an
/// empty scan.
pub fn scan_once(ctx: &RunContext, queue: &WorkQueue) -> ScanOutcome {
    if !ctx.root.is_dir() {
        ctx.reporter.emit(Event::RootMissing {
            root: ctx.root.clone(),
        });
        return ScanOutcome::Completed(0);
    }

    let mut count = 0_usize;
    let walker = WalkDir::new(&ctx.root)
        .follow_links(ctx.follow_links)
        .sort_by_file_name();
    for entry in walker {
        if ctx.state.is_stopping() || ctx.stop.is_cancelled() {
            return ScanOutcome::Aborted(count);
        }
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("walk error: {}", err);
                ctx.reporter.emit(Event::WalkError {
                    message: err.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if !should_queue(ctx, &path) {
            continue;
        }

        let file = display_name(&path);
        if queue.put(FileJob::Process(path), &ctx.stop).is_err() {
            if !ctx.state.is_stopping() {
                warn!("scan of {} interrupted while not stopping", ctx.root.display());
            }
            return ScanOutcome::Aborted(count);
        }
        count += 1;
        ctx.reporter.emit(Event::FileQueued { file });
    }
    ScanOutcome::Completed(count)
}

/// Include/exclude filter plus, in similarity mode, skipping the reference file itself.
fn should_queue(ctx: &RunContext, path: &Path) -> bool {
    if !should_scan(path, &ctx.include, &ctx.exclude) {
        return false;
    }
    match &ctx.reference {
        Some(reference) => !is_reference_file(path, &reference.path),
        None => true,
    }
}
