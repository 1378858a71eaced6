//! Public and internal types for the wordscan API and pipeline.

use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::config::DefaultSettings;

/// Normalized word → occurrence count for one document.
///
/// Keys are never empty. A full map iterates in first-occurrence order; a map returned by
/// [`top_k`](crate::text::top_k) iterates by descending count.
pub type WordFrequency = IndexMap<String, u64>;

/// Full word vector of the user-selected reference file.
///
/// Computed once by [`PipelineController::select_reference_file`](crate::pipeline::PipelineController::select_reference_file)
/// and shared read-only with every worker of a run.
#[derive(Clone, Debug)]
pub struct ReferenceVector {
    /// Canonical path, used to skip the reference itself during the walk.
    pub path: PathBuf,
    pub vector: WordFrequency,
}

/// Similarity of one scanned document to the reference file.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityResult {
    /// Path relative to the scan root, `/`-separated.
    pub document: String,
    /// Cosine similarity in `[0, 1]`.
    pub score: f64,
}

impl SimilarityResult {
    pub fn new(document: impl Into<String>, score: f64) -> Self {
        Self {
            document: document.into(),
            score,
        }
    }
}

impl fmt::Display for SimilarityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - similarity: {:.4}", self.document, self.score)
    }
}

/// Pipeline settings. Built from defaults, `.wordscan.toml` and CLI flags (in that order).
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory scanned recursively on every cycle.
    pub root: PathBuf,
    /// Number of worker threads.
    pub workers: usize,
    /// Work queue capacity. When None, equals `workers`.
    pub queue_capacity: Option<usize>,
    /// Idle time between two scans.
    pub rescan_delay: Duration,
    /// Number of entries reported per file. 0 reports every word.
    pub top_k: usize,
    /// File name pattern a file must match to be queued (glob syntax, e.g. `*.txt`).
    pub include: String,
    /// Exclude patterns (glob syntax), matched on file name and full path.
    pub exclude: Vec<String>,
    /// Follow symbolic links during the walk.
    pub follow_links: bool,
    /// Scan once, then shut the workers down as if stopped.
    pub single_pass: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DefaultSettings::ROOT),
            workers: DefaultSettings::WORKERS,
            queue_capacity: None,
            rescan_delay: Duration::from_secs(DefaultSettings::RESCAN_DELAY_SECS),
            top_k: DefaultSettings::TOP_K,
            include: DefaultSettings::INCLUDE.to_string(),
            exclude: Vec::new(),
            follow_links: false,
            single_pass: false,
        }
    }
}

impl Settings {
    /// Worker count, never below one.
    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }

    /// Queue capacity, defaulting to the worker count and never below one.
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
            .unwrap_or_else(|| self.worker_count())
            .max(1)
    }
}
