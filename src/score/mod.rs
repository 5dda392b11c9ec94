//! Scoring utilities for description content analysis.

pub mod similarity;

pub use similarity::{
    is_unmodified, similarity, similarity_upper_bound, tokenize_words, UNMODIFIED_THRESHOLD,
};
