use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDetailDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleSlug, PublishDate, Visibility},
};

pub struct GetArticleDetailQuery {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
}

impl ArticleQueryService {
    /// Looks a Published article up by its canonical address. Impossible dates
    /// and malformed slugs resolve to not-found like any other unknown address.
    pub async fn article_detail(
        &self,
        query: GetArticleDetailQuery,
    ) -> ApplicationResult<ArticleDetailDto> {
        let not_found = || ApplicationError::not_found("article not found");
        let date = PublishDate::from_parts(query.year, query.month, query.day)
            .map_err(|_| not_found())?;
        let slug = ArticleSlug::new(query.slug).map_err(|_| not_found())?;

        let article = self
            .read_repo
            .find_by_date_and_slug(date, &slug, Visibility::Published)
            .await?
            .ok_or_else(not_found)?;

        let comments = self.comment_repo.list_active(article.id).await?;
        let related = self.ranker.related(&article, self.related_limit).await?;

        Ok(ArticleDetailDto {
            article: article.into(),
            comments: comments.into_iter().map(Into::into).collect(),
            related: related.into_iter().map(Into::into).collect(),
        })
    }
}
