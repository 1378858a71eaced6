//! Load `.wordscan.toml` from a directory (CLI only). Library users build [`Settings`] directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Settings;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct WordscanToml {
    #[serde(default)]
    pub settings: SettingsSection,
}

/// `[settings]` table. Every key is optional; absent keys keep the current value.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsSection {
    pub root: Option<String>,
    pub workers: Option<usize>,
    pub queue_capacity: Option<usize>,
    /// Seconds.
    pub rescan_delay: Option<u64>,
    pub top_k: Option<usize>,
    pub include: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub follow_links: Option<bool>,
    pub once: Option<bool>,
    pub verbose: Option<bool>,
    pub reference: Option<String>,
    pub similarity: Option<bool>,
}

/// Load the settings file from `dir` if present. Returns None if missing or unreadable; a parse
/// error is logged and treated as missing.
pub fn load_wordscan_toml(dir: &Path) -> Option<WordscanToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_wordscan_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_wordscan_toml(s: &str) -> Result<WordscanToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite settings field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $settings:expr, $field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $settings.$field = v;
        }
    };
}

/// Apply file config to settings (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_settings(file: &WordscanToml, settings: &mut Settings) {
    let section = &file.settings;
    if let Some(ref root) = section.root {
        settings.root = PathBuf::from(root);
    }
    apply_file_opt!(section, settings, workers);
    if section.queue_capacity.is_some() {
        settings.queue_capacity = section.queue_capacity;
    }
    if let Some(secs) = section.rescan_delay {
        settings.rescan_delay = Duration::from_secs(secs);
    }
    apply_file_opt!(section, settings, top_k);
    apply_file_opt!(section, settings, include);
    apply_file_opt!(section, settings, exclude);
    apply_file_opt!(section, settings, follow_links);
    if let Some(once) = section.once {
        settings.single_pass = once;
    }
}
