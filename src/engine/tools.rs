//! Path and filter utilities

use std::path::{Path, PathBuf};

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Path as a `/`-separated string, so document ids look the same on every platform.
pub fn path_to_id_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Document id for `path`: relative to `root` when possible, else the path itself.
pub fn document_id(path: &Path, root: &Path) -> String {
    let rel = path_relative_to(path, root).unwrap_or_else(|| path.to_path_buf());
    path_to_id_string(&rel)
}

/// File name for status lines; falls back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" => true,
            // Linux
            ".directory" => true,
            // macOS resource fork files start with ._
            _ => name.starts_with("._"),
        }
    } else {
        false
    }
}

/// Returns true if the file at `path` should be queued: its name matches `include`, it is not an
/// OS metadata file, and no exclude pattern matches its name or full path.
pub fn should_scan(path: &Path, include: &str, exclude_patterns: &[String]) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };
    if !glob_match(include, name) {
        return false;
    }
    if is_os_hidden_file(path) {
        return false;
    }
    let path_str = path.to_str().unwrap_or("");
    !exclude_patterns
        .iter()
        .any(|pattern| glob_match(pattern, name) || glob_match(pattern, path_str))
}

/// True when `path` resolves to `reference` (both compared canonicalized).
pub fn is_reference_file(path: &Path, reference: &Path) -> bool {
    path.canonicalize()
        .map(|p| p == reference)
        .unwrap_or(false)
}

/// Simple glob pattern matching (supports * and ?). Iterative: on a mismatch only the most recent
/// `*` is widened, so matching stays O(pattern × text).
pub fn glob_match(pattern: &str, text: &str) -> bool {
    // Remove leading '!' if present (negation handled by caller)
    let pattern: Vec<char> = pattern.strip_prefix('!').unwrap_or(pattern).chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // (index of the last '*', text index it currently extends to)
    let mut star: Option<(usize, usize)> = None;
    while t < text.len() {
        match pattern.get(p) {
            Some(&'*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((star_p, star_t)) => {
                    star = Some((star_p, star_t + 1));
                    p = star_p + 1;
                    t = star_t + 1;
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}
