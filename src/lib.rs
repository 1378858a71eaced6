//! Wordscan: concurrent word-frequency scanner with cosine similarity ranking.
//!
//! A producer thread walks a directory tree and feeds a bounded queue; worker threads tokenize each
//! file and, in similarity mode, score it against a reference file. [`PipelineController`] is the
//! control surface: select a reference, start, stop, read the event stream and the sorted results.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod text;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::{ScanError, ScanResult};
pub use pipeline::{Event, PipelineController};
pub use text::{cosine, tokenize, top_k};

use log::debug;
use std::path::Path;

/// Result alias used by the binary and handlers
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single-pass convenience: scan `settings.root` once and return the similarity ranking against
/// `reference` (best first). Nobody subscribes to the event stream, so events are only logged.
///
/// ```ignore
/// let settings = wordscan::Settings { root: "corpus".into(), ..Default::default() };
/// let ranked = wordscan::rank_dir(&settings, std::path::Path::new("corpus/query.txt"))?;
/// ```
pub fn rank_dir(settings: &Settings, reference: &Path) -> Result<Vec<SimilarityResult>> {
    let settings = Settings {
        single_pass: true,
        ..settings.clone()
    };
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        settings
    );
    let mut controller = PipelineController::new(settings);
    controller.select_reference_file(reference)?;
    controller.set_similarity_mode(true)?;
    controller.start()?;
    controller.wait()?;
    let results = controller.sorted_results();
    controller.shutdown();
    Ok(results)
}
