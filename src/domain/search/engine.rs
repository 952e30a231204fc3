// src/domain/search/engine.rs
use super::{
    analyzer::{Analyzer, TextLanguage},
    rank::SearchWeights,
    results::{ScoredArticle, select_ranked},
};
use crate::domain::article::{ArticleReadRepository, Visibility};
use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr, sync::Arc};

pub const DEFAULT_RANK_THRESHOLD: f64 = 0.3;
pub const DEFAULT_TRIGRAM_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Language-aware full-text rank over title (class A) and body (class B).
    #[default]
    WeightedFullText,
    /// Trigram similarity against the title only.
    TitleTrigram,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchStrategy::WeightedFullText => "fulltext",
            SearchStrategy::TitleTrigram => "trigram",
        })
    }
}

impl FromStr for SearchStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fulltext" | "full-text" | "weighted" => Ok(SearchStrategy::WeightedFullText),
            "trigram" | "similarity" => Ok(SearchStrategy::TitleTrigram),
            other => Err(DomainError::Validation(format!(
                "unknown search strategy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub strategy: SearchStrategy,
    pub language: TextLanguage,
    pub weights: SearchWeights,
    pub rank_threshold: f64,
    pub trigram_threshold: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            language: TextLanguage::default(),
            weights: SearchWeights::default(),
            rank_threshold: DEFAULT_RANK_THRESHOLD,
            trigram_threshold: DEFAULT_TRIGRAM_THRESHOLD,
        }
    }
}

impl SearchSettings {
    pub fn threshold(&self) -> f64 {
        match self.strategy {
            SearchStrategy::WeightedFullText => self.rank_threshold,
            SearchStrategy::TitleTrigram => self.trigram_threshold,
        }
    }
}

/// Weighted full-text request handed to the store.
#[derive(Debug, Clone)]
pub struct TextSearch {
    /// Raw query, for stores that analyze text themselves.
    pub query: String,
    /// Distinct normalized query lexemes, OR-combined.
    pub lexemes: Vec<String>,
    pub language: TextLanguage,
    pub weights: SearchWeights,
    pub min_rank: f64,
    pub visibility: Visibility,
}

#[derive(Debug, Clone)]
pub struct TitleSimilaritySearch {
    pub query: String,
    pub min_similarity: f64,
    pub visibility: Visibility,
}

/// Scores Published articles against a free-text query and returns those at or
/// above the configured threshold, best first.
pub struct RelevanceSearchEngine {
    store: Arc<dyn ArticleReadRepository>,
    analyzer: Analyzer,
    settings: SearchSettings,
}

impl RelevanceSearchEngine {
    pub fn new(store: Arc<dyn ArticleReadRepository>, settings: SearchSettings) -> Self {
        Self {
            store,
            analyzer: Analyzer::new(settings.language),
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub async fn search(&self, query: &str) -> DomainResult<Vec<ScoredArticle>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let scored = match self.settings.strategy {
            SearchStrategy::WeightedFullText => {
                let lexemes = self.analyzer.query_lexemes(query);
                if lexemes.is_empty() {
                    tracing::debug!(query, "query reduced to stop words only");
                    return Ok(Vec::new());
                }
                let search = TextSearch {
                    query: query.to_string(),
                    lexemes,
                    language: self.settings.language,
                    weights: self.settings.weights,
                    min_rank: self.settings.rank_threshold,
                    visibility: Visibility::Published,
                };
                self.store.rank_text(&search).await?
            }
            SearchStrategy::TitleTrigram => {
                let search = TitleSimilaritySearch {
                    query: query.to_string(),
                    min_similarity: self.settings.trigram_threshold,
                    visibility: Visibility::Published,
                };
                self.store.rank_title_similarity(&search).await?
            }
        };

        let selected = select_ranked(scored, self.settings.threshold());
        tracing::debug!(
            query,
            strategy = %self.settings.strategy,
            hits = selected.len(),
            "search completed"
        );
        Ok(selected)
    }
}
