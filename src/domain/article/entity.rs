// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleBody, ArticleId, ArticleSlug, ArticleStatus, ArticleTitle,
};
use crate::domain::author::{Author, AuthorId};
use crate::domain::tag::{NewTag, TagSet};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub status: ArticleStatus,
    pub author: Author,
    pub publish_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: TagSet,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// Calendar day (UTC) under which the slug must be unique.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish_at.date_naive()
    }

    /// `year/month/day/slug`, the stable address of the article.
    pub fn date_path(&self) -> String {
        let date = self.publish_date();
        format!(
            "{}/{}/{}/{}",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }

    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.status = ArticleStatus::Published;
        self.updated_at = now;
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.status = ArticleStatus::Draft;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub status: ArticleStatus,
    pub author_id: AuthorId,
    pub publish_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<NewTag>,
}

#[derive(Debug, Clone)]
pub struct ArticleStatusUpdate {
    pub id: ArticleId,
    pub status: ArticleStatus,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
