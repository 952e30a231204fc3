use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleId, Visibility},
};

const MAX_RELATED_LIMIT: usize = 20;

pub struct RelatedArticlesQuery {
    pub id: i64,
    pub limit: Option<usize>,
}

impl ArticleQueryService {
    pub async fn related_articles(
        &self,
        query: RelatedArticlesQuery,
    ) -> ApplicationResult<Vec<ArticleDto>> {
        let id = ArticleId::new(query.id)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        let article = self
            .read_repo
            .find_by_id(id, Visibility::Published)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let limit = query
            .limit
            .unwrap_or(self.related_limit)
            .min(MAX_RELATED_LIMIT);
        let related = self.ranker.related(&article, limit).await?;
        Ok(related.into_iter().map(Into::into).collect())
    }
}
