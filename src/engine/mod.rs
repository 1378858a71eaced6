//! Front-end glue: argument parsing, the CLI handler and walk filter helpers.

pub mod arg_parser;
pub mod cli;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{RunOptions, format_results, handle_run, resolve_options};
pub use tools::{
    display_name, document_id, glob_match, is_os_hidden_file, is_reference_file,
    path_relative_to, path_to_id_string, should_scan,
};
