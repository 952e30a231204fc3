use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, Page},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleOrdering, ArticleQuery},
        tag::TagSlug,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    /// Raw page token as received; invalid values are clamped, never rejected.
    pub page: Option<String>,
    pub tag: Option<String>,
    pub ordering: ArticleOrdering,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<Page<ArticleDto>> {
        let tag = match query.tag.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(self.resolve_tag(raw).await?),
        };

        let filter = ArticleQuery::published()
            .with_tag(tag)
            .ordered(query.ordering);
        let total = self.read_repo.count(&filter).await?;
        let selection = self.paginator.select(query.page.as_deref(), total);

        let records = self
            .read_repo
            .list(&filter.window(selection.offset, selection.limit))
            .await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(Page::new(items, &selection))
    }

    async fn resolve_tag(&self, raw: &str) -> ApplicationResult<TagSlug> {
        let slug = TagSlug::new(raw).map_err(|_| ApplicationError::not_found("tag not found"))?;
        self.tag_repo
            .find_by_slug(&slug)
            .await?
            .map(|tag| tag.slug)
            .ok_or_else(|| ApplicationError::not_found("tag not found"))
    }
}
