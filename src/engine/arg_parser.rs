use clap::Parser;
use std::path::PathBuf;

/// Concurrent word-frequency scanner with cosine similarity ranking.
#[derive(Clone, Debug, Parser)]
#[command(name = "wordscan")]
#[command(about = "Scan a directory of text files; report word statistics and similarity to a reference file.")]
pub struct Cli {
    /// Directory to scan. Default: `files` (or `root` from .wordscan.toml).
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Reference file for similarity mode.
    #[arg(long, short = 'r', value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Score every scanned file against the reference file.
    #[arg(long, short = 's', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub similarity: Option<bool>,

    /// Number of worker threads.
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Work queue capacity. Default: number of workers.
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Seconds between two scans of the directory.
    #[arg(long, value_name = "SECS")]
    pub rescan_delay: Option<u64>,

    /// Words reported per file (0 = all).
    #[arg(long, short = 'k')]
    pub top_k: Option<usize>,

    /// File name pattern to analyze (glob syntax).
    #[arg(long, value_name = "PATTERN")]
    pub include: Option<String>,

    /// Exclude patterns (glob syntax). Can specify multiple: -e pattern1 pattern2 pattern3
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Scan once, print results and exit instead of rescanning until Ctrl+C.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub once: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
