use crate::domain::search::ScoredArticle;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ArticleDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchHitDto {
    pub rank: f64,
    pub article: ArticleDto,
}

impl From<ScoredArticle> for SearchHitDto {
    fn from(scored: ScoredArticle) -> Self {
        Self {
            rank: scored.rank,
            article: scored.article.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResultsDto {
    pub query: String,
    pub strategy: String,
    pub total: usize,
    pub hits: Vec<SearchHitDto>,
}
