//! Processing workers: take jobs until a sentinel, tokenize each file, score it against the
//! reference when similarity mode is on. Failures are isolated per file.

use log::error;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use super::context::RunContext;
use super::events::Event;
use super::queue::{FileJob, WorkQueue};
use crate::SimilarityResult;
use crate::engine::tools::{display_name, document_id};
use crate::error::ScanResult;
use crate::text::{cosine, read_text, tokenize, top_k};

/// Worker thread body. Returns the number of files handled (failed ones included).
pub fn run_worker(ctx: Arc<RunContext>, queue: WorkQueue) -> usize {
    let name = thread::current().name().unwrap_or("worker").to_string();
    ctx.reporter.emit(Event::WorkerStarted { name: name.clone() });

    let mut handled = 0_usize;
    loop {
        match queue.take(&ctx.shutdown) {
            Ok(FileJob::Sentinel) => break,
            Ok(FileJob::Process(path)) => {
                process_file(&ctx, &path);
                handled += 1;
            }
            Err(_) => {
                ctx.reporter
                    .emit(Event::WorkerInterrupted { name: name.clone() });
                break;
            }
        }
    }

    ctx.reporter.emit(Event::WorkerStopped { name });
    handled
}

/// Handle one file; any error is reported with the file name and swallowed.
fn process_file(ctx: &RunContext, path: &Path) {
    let file = display_name(path);
    ctx.reporter.emit(Event::FileProcessing { file: file.clone() });
    if let Err(err) = analyze_file(ctx, path, &file) {
        error!("{}: {}", path.display(), err);
        ctx.reporter.emit(Event::FileFailed {
            file,
            message: err.to_string(),
        });
    }
}

/// Read once, report the top-k stats, then (similarity mode) score the full, untruncated vector.
fn analyze_file(ctx: &RunContext, path: &Path, file: &str) -> ScanResult<()> {
    let text = read_text(path)?;
    let full = tokenize(&text);
    let stats = top_k(&full, ctx.top_k)?;
    ctx.reporter.emit(Event::WordStats {
        file: file.to_string(),
        stats,
    });

    if let Some(reference) = &ctx.reference {
        let score = cosine(&reference.vector, &full);
        let document = document_id(path, &ctx.root);
        ctx.results.push(SimilarityResult::new(document.clone(), score));
        ctx.reporter.emit(Event::Similarity {
            file: document,
            score,
        });
    }
    Ok(())
}
