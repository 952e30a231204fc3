use crate::domain::article::CommentedArticle;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ArticleDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentedArticleDto {
    pub comments: u64,
    pub article: ArticleDto,
}

impl From<CommentedArticle> for CommentedArticleDto {
    fn from(entry: CommentedArticle) -> Self {
        Self {
            comments: entry.comments,
            article: entry.article.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogStatsDto {
    pub total_published: u64,
    pub latest: Vec<ArticleDto>,
    pub most_commented: Vec<CommentedArticleDto>,
}
