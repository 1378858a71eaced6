//! Application configuration constants.
//! Defaults and package-derived names in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Name of the optional settings file looked up in the working directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Pipeline defaults ----

/// Defaults for [`Settings`](crate::Settings).
pub struct DefaultSettings;

impl DefaultSettings {
    /// Scan root, relative to the working directory.
    pub const ROOT: &'static str = "files";
    /// Consumer threads; the producer is always one extra thread.
    pub const WORKERS: usize = 2;
    /// Seconds the producer idles between two scans.
    pub const RESCAN_DELAY_SECS: u64 = 60;
    /// Words reported per file.
    pub const TOP_K: usize = 10;
    /// Files queued for analysis.
    pub const INCLUDE: &'static str = "*.txt";
}

// ---- Result output ----

/// Banner printed around the sorted similarity results.
pub const RESULTS_BANNER: &str = "===== SORTED SIMILARITY RESULTS =====";
pub const RESULTS_FOOTER: &str = "=====================================";
