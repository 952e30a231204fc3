use std::sync::Arc;

use crate::domain::{
    article::{ArticleReadRepository, RelatedContentRanker, related::DEFAULT_RELATED_LIMIT},
    comment::CommentRepository,
    pagination::{DEFAULT_PAGE_SIZE, Paginator},
    search::{RelevanceSearchEngine, SearchSettings},
    tag::TagRepository,
};

#[derive(Debug, Clone, Copy)]
pub struct ArticleQuerySettings {
    pub page_size: u32,
    pub related_limit: usize,
    pub search: SearchSettings,
}

impl Default for ArticleQuerySettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            related_limit: DEFAULT_RELATED_LIMIT,
            search: SearchSettings::default(),
        }
    }
}

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) comment_repo: Arc<dyn CommentRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) search_engine: RelevanceSearchEngine,
    pub(super) ranker: RelatedContentRanker,
    pub(super) paginator: Paginator,
    pub(super) related_limit: usize,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        tag_repo: Arc<dyn TagRepository>,
        settings: ArticleQuerySettings,
    ) -> Self {
        Self {
            search_engine: RelevanceSearchEngine::new(Arc::clone(&read_repo), settings.search),
            ranker: RelatedContentRanker::new(Arc::clone(&read_repo)),
            paginator: Paginator::new(settings.page_size),
            related_limit: settings.related_limit,
            read_repo,
            comment_repo,
            tag_repo,
        }
    }
}
