pub mod config;
pub mod logger;
pub mod wordscan_toml;

pub use config::*;
pub use logger::setup_logging;
pub use wordscan_toml::{apply_file_to_settings, load_wordscan_toml, parse_wordscan_toml};
