//! Text analysis: tokenization and similarity scoring. Pure functions, no shared state.

pub mod similarity;
pub mod tokenizer;

pub use similarity::cosine;
pub use tokenizer::{read_text, tokenize, tokenize_file, top_k, word_stats};
