//! Cosine similarity between two word-frequency vectors.

use crate::WordFrequency;

/// Sum of squared counts, square-rooted.
fn norm(v: &WordFrequency) -> f64 {
    v.values()
        .map(|&c| {
            let c = c as f64;
            c * c
        })
        .sum::<f64>()
        .sqrt()
}

/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// Words missing from one side count as 0, so only shared words contribute to the dot product.
/// Returns 0.0 when either vector is empty. The result is clamped to `[0, 1]`.
pub fn cosine(a: &WordFrequency, b: &WordFrequency) -> f64 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    // Walk the smaller map; lookups into the larger one are O(1).
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(word, &x)| large.get(word).map(|&y| x as f64 * y as f64))
        .sum();
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
