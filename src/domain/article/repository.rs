use crate::domain::article::entity::{Article, ArticleStatusUpdate, NewArticle};
use crate::domain::article::query::{ArticleQuery, Visibility};
use crate::domain::article::related::TagOverlap;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, PublishDate};
use crate::domain::errors::DomainResult;
use crate::domain::search::{ScoredArticle, TextSearch, TitleSimilaritySearch};
use crate::domain::tag::TagId;
use async_trait::async_trait;

/// A Published article together with its number of comments.
#[derive(Debug, Clone)]
pub struct CommentedArticle {
    pub article: Article,
    pub comments: u64,
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update_status(&self, update: ArticleStatusUpdate) -> DomainResult<Article>;
    /// Deletes the article and, with it, its comments.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: ArticleId,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>>;

    async fn find_by_date_and_slug(
        &self,
        date: PublishDate,
        slug: &ArticleSlug,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>>;

    async fn count(&self, query: &ArticleQuery) -> DomainResult<u64>;

    async fn list(&self, query: &ArticleQuery) -> DomainResult<Vec<Article>>;

    /// Weighted title/body rank of every visible article; entries below
    /// `search.min_rank` may be omitted.
    async fn rank_text(&self, search: &TextSearch) -> DomainResult<Vec<ScoredArticle>>;

    /// Trigram similarity between the query and each visible title; entries
    /// below `search.min_similarity` may be omitted.
    async fn rank_title_similarity(
        &self,
        search: &TitleSimilaritySearch,
    ) -> DomainResult<Vec<ScoredArticle>>;

    /// Visible articles other than `exclude` sharing at least one of `tags`,
    /// with the number shared.
    async fn tag_overlaps(
        &self,
        exclude: ArticleId,
        tags: &[TagId],
        visibility: Visibility,
    ) -> DomainResult<Vec<TagOverlap>>;

    /// Visible articles by descending comment count, newest first on ties.
    async fn most_commented(
        &self,
        visibility: Visibility,
        limit: u64,
    ) -> DomainResult<Vec<CommentedArticle>>;
}
