// src/domain/search/mod.rs
pub mod analyzer;
pub mod engine;
pub mod rank;
pub mod results;
mod stopwords;
pub mod trigram;

pub use analyzer::{Analyzer, TextLanguage, Token};
pub use engine::{
    RelevanceSearchEngine, SearchSettings, SearchStrategy, TextSearch, TitleSimilaritySearch,
};
pub use rank::{SearchWeights, WeightedDocument};
pub use results::{ScoredArticle, select_ranked};
