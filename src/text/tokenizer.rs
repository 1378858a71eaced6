//! Text → word-frequency conversion and top-k truncation.

use std::cmp::Reverse;
use std::path::Path;

use crate::WordFrequency;
use crate::error::{ScanError, ScanResult};

/// True for characters that survive normalization: letters (diacritics included), digits, whitespace.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace()
}

/// Lower-case a line and blank out every character that is not part of a word.
fn normalize_line(line: &str) -> String {
    line.to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect()
}

/// Count normalized words in `text`.
///
/// Each line is lower-cased, punctuation and symbols become spaces, and the remainder is split on
/// whitespace runs. Keys appear in first-occurrence order.
pub fn tokenize(text: &str) -> WordFrequency {
    let mut freq = WordFrequency::new();
    for line in text.lines() {
        let normalized = normalize_line(line);
        for word in normalized.trim().split_whitespace() {
            *freq.entry(word.to_string()).or_insert(0) += 1;
        }
    }
    freq
}

/// Keep the `k` most frequent words, ordered by descending count. Ties are broken by word so the
/// output does not depend on hash order.
///
/// `k == 0` returns the full map unchanged.
pub fn top_k(freq: &WordFrequency, k: usize) -> ScanResult<WordFrequency> {
    if k == 0 {
        return Ok(freq.clone());
    }
    let mut ranked: Vec<(&String, &u64)> = freq.iter().collect();
    ranked.sort_by_key(|&(word, count)| (Reverse(*count), word));

    let mut out = WordFrequency::with_capacity(k.min(ranked.len()));
    for (word, count) in ranked.into_iter().take(k) {
        if out.insert(word.clone(), *count).is_some() {
            return Err(ScanError::DuplicateKey(word.clone()));
        }
    }
    Ok(out)
}

/// [`tokenize`] then [`top_k`].
pub fn word_stats(text: &str, k: usize) -> ScanResult<WordFrequency> {
    top_k(&tokenize(text), k)
}

/// Read `path` as UTF-8 text and tokenize it (full vector).
pub fn tokenize_file(path: &Path) -> ScanResult<WordFrequency> {
    let text = read_text(path)?;
    Ok(tokenize(&text))
}

/// Read a whole file as UTF-8 text, tagging I/O failures with the path.
///
/// Invalid UTF-8 (e.g. a Latin-2 file) is an `InvalidData` read error: the file is reported as
/// failed rather than analysed with replacement characters splitting its words.
pub fn read_text(path: &Path) -> ScanResult<String> {
    std::fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })
}
