// src/domain/search/rank.rs
//! Weighted multi-field relevance scoring with PostgreSQL `ts_rank` semantics.
use super::analyzer::Analyzer;
use std::collections::HashMap;

/// `ts_rank` keeps at most this many positions per lexeme.
const MAX_POSITIONS_PER_LEXEME: usize = 256;
/// Limit of `sum(1/i^2)` for `i = 1..inf`, i.e. `pi^2/6`.
const BASEL: f64 = 1.644_934_066_85;

/// Counts above `u32::MAX` saturate.
pub(crate) fn count_as_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

pub const DEFAULT_WEIGHT_D: f32 = 0.1;
pub const DEFAULT_WEIGHT_C: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWeights {
    /// Weight class A.
    pub title: f32,
    /// Weight class B.
    pub body: f32,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            title: 1.0,
            body: 0.4,
        }
    }
}

impl SearchWeights {
    /// Weights in `ts_rank` array order `{D, C, B, A}`.
    pub fn as_ts_rank_array(&self) -> [f32; 4] {
        [DEFAULT_WEIGHT_D, DEFAULT_WEIGHT_C, self.body, self.title]
    }
}

/// Position-ordered postings of every lexeme in a document built from several
/// weighted fields. Positions keep increasing across fields, like
/// `setweight(title, 'A') || setweight(body, 'B')`.
#[derive(Debug, Default)]
pub struct WeightedDocument {
    postings: HashMap<String, Vec<f64>>,
}

impl WeightedDocument {
    pub fn build(analyzer: &Analyzer, fields: &[(&str, f32)]) -> Self {
        let mut postings: HashMap<String, Vec<f64>> = HashMap::new();
        for (text, weight) in fields {
            for token in analyzer.tokens(text) {
                let entry = postings.entry(token.lexeme).or_default();
                if entry.len() < MAX_POSITIONS_PER_LEXEME {
                    entry.push(f64::from(*weight));
                }
            }
        }
        Self { postings }
    }

    pub fn for_article(
        analyzer: &Analyzer,
        title: &str,
        body: &str,
        weights: SearchWeights,
    ) -> Self {
        Self::build(analyzer, &[(title, weights.title), (body, weights.body)])
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// True when any query lexeme occurs in the document.
    pub fn matches(&self, lexemes: &[String]) -> bool {
        lexemes.iter().any(|lexeme| self.postings.contains_key(lexeme))
    }

    /// OR-rank of the distinct `lexemes` against this document.
    ///
    /// Each present lexeme contributes `(w_max + sum(w_j / j^2) - w_max / j_max^2) / (pi^2/6)`
    /// over its occurrences; the total is averaged over all query lexemes, so
    /// lexemes missing from the document dilute the score.
    pub fn rank(&self, lexemes: &[String]) -> f64 {
        if lexemes.is_empty() || self.postings.is_empty() {
            return 0.0;
        }

        let mut total = 0.0;
        for lexeme in lexemes {
            let Some(weights) = self.postings.get(lexeme) else {
                continue;
            };

            let mut sum = 0.0;
            let mut max_weight = -1.0;
            let mut max_index = 0usize;
            for (index, weight) in weights.iter().enumerate() {
                let denom = count_as_f64((index + 1) * (index + 1));
                sum += weight / denom;
                if *weight > max_weight {
                    max_weight = *weight;
                    max_index = index;
                }
            }
            let max_denom = count_as_f64((max_index + 1) * (max_index + 1));
            total += (max_weight + sum - max_weight / max_denom) / BASEL;
        }

        total / count_as_f64(lexemes.len())
    }
}
