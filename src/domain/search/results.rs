// src/domain/search/results.rs
use crate::domain::article::Article;
use std::cmp::Ordering;

/// An article paired with the score a query gave it. Never persisted.
#[derive(Debug, Clone)]
pub struct ScoredArticle {
    pub article: Article,
    pub rank: f64,
}

impl ScoredArticle {
    pub fn new(article: Article, rank: f64) -> Self {
        Self { article, rank }
    }
}

/// Newest `publish` first, then highest id.
fn recency(a: &Article, b: &Article) -> Ordering {
    b.publish_at.cmp(&a.publish_at).then_with(|| b.id.cmp(&a.id))
}

/// Drops anything scoring below `threshold` (or NaN) and orders the rest by
/// rank descending, breaking ties by recency.
pub fn select_ranked(mut scored: Vec<ScoredArticle>, threshold: f64) -> Vec<ScoredArticle> {
    scored.retain(|hit| hit.rank.is_finite() && hit.rank >= threshold);
    scored.sort_by(|a, b| {
        b.rank
            .total_cmp(&a.rank)
            .then_with(|| recency(&a.article, &b.article))
    });
    scored
}
