use crate::domain::{article::Article, author::Author, tag::Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CommentDto, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i64,
    pub username: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into(),
            username: author.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            name: tag.name.as_str().to_string(),
            slug: tag.slug.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: String,
    /// Canonical `/{year}/{month}/{day}/{slug}` address.
    pub path: String,
    pub author: AuthorDto,
    pub tags: Vec<TagDto>,
    #[serde(with = "serde_time")]
    pub publish: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        let path = format!("/{}", article.date_path());
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            body: article.body.into_inner(),
            status: article.status.as_str().to_string(),
            path,
            author: article.author.into(),
            tags: article.tags.into_iter().map(Into::into).collect(),
            publish: article.publish_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// An article with its active comments and related reading.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDetailDto {
    pub article: ArticleDto,
    pub comments: Vec<CommentDto>,
    pub related: Vec<ArticleDto>,
}
