// src/domain/search/trigram.rs
//! Trigram similarity with `pg_trgm` semantics.
use super::rank::count_as_f64;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

fn trigrams(text: &str) -> HashSet<[char; 3]> {
    let normalized: String = text.nfc().collect::<String>().to_lowercase();
    let mut set = HashSet::new();

    for word in normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        // Each word is padded with two spaces in front and one behind.
        let padded: Vec<char> = "  "
            .chars()
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for window in padded.windows(3) {
            set.insert([window[0], window[1], window[2]]);
        }
    }

    set
}

/// Shared trigrams divided by the size of the trigram union, in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = trigrams(a);
    let right = trigrams(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(&right).count();
    let union = left.len() + right.len() - shared;
    count_as_f64(shared) / count_as_f64(union)
}
