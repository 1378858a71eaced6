//! Wordscan CLI: scan a text tree, report word statistics, rank files against a reference.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use wordscan::engine::arg_parser::Cli;
use wordscan::engine::handle_run;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
