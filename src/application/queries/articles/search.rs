use super::ArticleQueryService;
use crate::application::{dto::SearchResultsDto, error::ApplicationResult};

pub struct SearchArticlesQuery {
    pub query: Option<String>,
}

impl ArticleQueryService {
    /// A missing or blank query yields an empty result set rather than an error.
    pub async fn search_articles(
        &self,
        query: SearchArticlesQuery,
    ) -> ApplicationResult<SearchResultsDto> {
        let text = query.query.unwrap_or_default();
        let hits = self.search_engine.search(&text).await?;

        Ok(SearchResultsDto {
            query: text.trim().to_string(),
            strategy: self.search_engine.settings().strategy.to_string(),
            total: hits.len(),
            hits: hits.into_iter().map(Into::into).collect(),
        })
    }
}
