// tests/support/mocks/repos.rs
use async_trait::async_trait;
use bitacora::domain::{
    article::{
        Article, ArticleId, ArticleQuery, ArticleReadRepository, ArticleSlug, CommentedArticle,
        PublishDate, TagOverlap, Visibility,
    },
    errors::DomainResult,
    search::{ScoredArticle, TextSearch, TitleSimilaritySearch},
    tag::TagId,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Read repository wrapper that counts every call reaching the store.
pub struct CountingArticleRead {
    inner: Arc<dyn ArticleReadRepository>,
    calls: AtomicUsize,
}

impl CountingArticleRead {
    pub fn new(inner: Arc<dyn ArticleReadRepository>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ArticleReadRepository for CountingArticleRead {
    async fn find_by_id(
        &self,
        id: ArticleId,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>> {
        self.hit();
        self.inner.find_by_id(id, visibility).await
    }

    async fn find_by_date_and_slug(
        &self,
        date: PublishDate,
        slug: &ArticleSlug,
        visibility: Visibility,
    ) -> DomainResult<Option<Article>> {
        self.hit();
        self.inner.find_by_date_and_slug(date, slug, visibility).await
    }

    async fn count(&self, query: &ArticleQuery) -> DomainResult<u64> {
        self.hit();
        self.inner.count(query).await
    }

    async fn list(&self, query: &ArticleQuery) -> DomainResult<Vec<Article>> {
        self.hit();
        self.inner.list(query).await
    }

    async fn rank_text(&self, search: &TextSearch) -> DomainResult<Vec<ScoredArticle>> {
        self.hit();
        self.inner.rank_text(search).await
    }

    async fn rank_title_similarity(
        &self,
        search: &TitleSimilaritySearch,
    ) -> DomainResult<Vec<ScoredArticle>> {
        self.hit();
        self.inner.rank_title_similarity(search).await
    }

    async fn tag_overlaps(
        &self,
        exclude: ArticleId,
        tags: &[TagId],
        visibility: Visibility,
    ) -> DomainResult<Vec<TagOverlap>> {
        self.hit();
        self.inner.tag_overlaps(exclude, tags, visibility).await
    }

    async fn most_commented(
        &self,
        visibility: Visibility,
        limit: u64,
    ) -> DomainResult<Vec<CommentedArticle>> {
        self.hit();
        self.inner.most_commented(visibility, limit).await
    }
}
