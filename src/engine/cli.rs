//! CLI command handler: resolve settings, drive one run of the pipeline, print results.

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::engine::arg_parser::Cli;
use crate::pipeline::{Event, PipelineController};
use crate::utils::wordscan_toml::WordscanToml;
use crate::utils::{
    RESULTS_BANNER, RESULTS_FOOTER, apply_file_to_settings, load_wordscan_toml, setup_logging,
};
use crate::{Settings, SimilarityResult};

/// Everything the handler needs after merging defaults, `.wordscan.toml` and CLI flags.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub settings: Settings,
    pub reference: Option<PathBuf>,
    pub similarity: bool,
    pub verbose: bool,
}

/// Merge defaults ← file ← CLI. Pure, so it can be tested without touching the filesystem.
pub fn resolve_options(cli: &Cli, file: Option<&WordscanToml>) -> RunOptions {
    let mut settings = Settings::default();
    let mut reference = None;
    let mut similarity = false;
    let mut verbose = false;
    if let Some(file) = file {
        apply_file_to_settings(file, &mut settings);
        reference = file.settings.reference.as_ref().map(PathBuf::from);
        similarity = file.settings.similarity.unwrap_or(false);
        verbose = file.settings.verbose.unwrap_or(false);
    }

    if let Some(ref dir) = cli.dir {
        settings.root = dir.clone();
    }
    if let Some(workers) = cli.workers {
        settings.workers = workers;
    }
    if cli.queue_capacity.is_some() {
        settings.queue_capacity = cli.queue_capacity;
    }
    if let Some(secs) = cli.rescan_delay {
        settings.rescan_delay = Duration::from_secs(secs);
    }
    if let Some(k) = cli.top_k {
        settings.top_k = k;
    }
    if let Some(ref include) = cli.include {
        settings.include = include.clone();
    }
    if !cli.exclude.is_empty() {
        settings.exclude = cli.exclude.clone();
    }
    if let Some(follow) = cli.follow_links {
        settings.follow_links = follow;
    }
    if let Some(once) = cli.once {
        settings.single_pass = once;
    }
    if cli.reference.is_some() {
        reference = cli.reference.clone();
    }
    // A reference on the command line implies similarity mode unless explicitly disabled.
    similarity = cli
        .similarity
        .unwrap_or(similarity || cli.reference.is_some());
    if let Some(v) = cli.verbose {
        verbose = v;
    }

    RunOptions {
        settings,
        reference,
        similarity,
        verbose,
    }
}

fn setup_options(cli: &Cli) -> RunOptions {
    let file = load_wordscan_toml(Path::new("."));
    let opts = resolve_options(cli, file.as_ref());
    setup_logging(opts.verbose);
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);
    opts
}

/// Render the event stream until every sender is gone.
fn print_events(events: Receiver<Event>) {
    while let Ok(event) = events.recv() {
        println!("{event}");
    }
}

/// Render the sorted similarity results, or a notice when there are none.
pub fn format_results(results: &[SimilarityResult]) -> String {
    let mut out = format!("Similarity results: {}\n", results.len());
    if results.is_empty() {
        out.push_str("No similarity results to display.\n");
        return out;
    }
    out.push('\n');
    out.push_str(RESULTS_BANNER);
    out.push('\n');
    for result in results {
        out.push_str(&result.to_string());
        out.push('\n');
    }
    out.push_str(RESULTS_FOOTER);
    out.push('\n');
    out
}

/// Run the pipeline: once with `--once`, otherwise rescanning until Ctrl+C.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_options(cli);
    let mut controller = PipelineController::new(opts.settings.clone());
    let events = controller.events();
    let printer = thread::Builder::new()
        .name("events".to_string())
        .spawn(move || print_events(events))
        .context("spawn event printer")?;

    if let Some(ref reference) = opts.reference {
        controller
            .select_reference_file(reference)
            .with_context(|| format!("load reference file {}", reference.display()))?;
    }
    if opts.similarity {
        controller
            .set_similarity_mode(true)
            .context("enable similarity mode")?;
    }

    controller.start().context("start pipeline")?;
    if let Some(handle) = controller.stop_handle() {
        ctrlc::set_handler(move || handle.stop()).context("set Ctrl+C handler")?;
    }
    if !opts.settings.single_pass {
        info!(
            "Rescanning {} every {}s; press Ctrl+C to stop.",
            opts.settings.root.display(),
            opts.settings.rescan_delay.as_secs()
        );
    }

    let handled = controller.wait().context("wait for pipeline")?;
    info!("Processed {} files", handled);
    let results = controller.sorted_results();
    controller.shutdown();
    // Dropping the controller drops the last event sender, which ends the printer.
    drop(controller);
    let _ = printer.join();

    if opts.similarity {
        print!("{}", format_results(&results));
    }
    Ok(())
}
