use strsim::normalized_levenshtein;

use crate::config::Scorer;

/// Normalized edit-distance ratio on a 0-100 scale.
pub fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Token-sort ratio: whitespace tokens are sorted before comparison, so the
/// measure is invariant to name-part ordering ("john paul" vs "paul john",
/// surname-first vs given-first). Symmetric by construction.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sort_tokens(a), &sort_tokens(b))
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

impl Scorer {
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Self::TokenSort => token_sort_ratio(a, b),
            Self::Levenshtein => ratio(a, b),
        }
    }
}
