// src/infrastructure/seed.rs
//! Loads demo content from a JSON file through the regular command services.
use crate::application::{
    commands::{articles::CreateArticleCommand, comments::PostCommentCommand},
    error::{ApplicationError, ApplicationResult},
    services::ApplicationServices,
};
use crate::domain::{article::ArticleStatus, author::AuthorDirectory};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub articles: Vec<SeedArticle>,
}

#[derive(Debug, Deserialize)]
pub struct SeedArticle {
    pub title: String,
    pub body: String,
    pub author: String,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub publish: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Deserialize)]
pub struct SeedComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub articles: usize,
    pub comments: usize,
}

impl SeedFile {
    pub fn from_json(raw: &str) -> ApplicationResult<Self> {
        serde_json::from_str(raw)
            .map_err(|err| ApplicationError::validation(format!("invalid seed file: {err}")))
    }

    pub async fn read(path: &Path) -> ApplicationResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
            ApplicationError::infrastructure(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub async fn apply(
        self,
        services: &ApplicationServices,
        authors: &dyn AuthorDirectory,
    ) -> ApplicationResult<SeedReport> {
        let mut report = SeedReport::default();

        for entry in self.articles {
            let author = authors.ensure(&entry.author).await?;
            let mut builder = CreateArticleCommand::builder()
                .title(entry.title)
                .body(entry.body)
                .author(author.id.into())
                .status(entry.status)
                .tags(entry.tags);
            if let Some(publish) = entry.publish {
                builder = builder.publish_at(publish);
            }
            let command = builder.build().map_err(ApplicationError::validation)?;
            let article = services.article_commands.create_article(command).await?;
            report.articles += 1;

            if entry.status != ArticleStatus::Published && !entry.comments.is_empty() {
                tracing::warn!(slug = %article.slug, "skipping comments on unpublished article");
                continue;
            }
            for comment in entry.comments {
                services
                    .comment_commands
                    .post_comment(PostCommentCommand {
                        article_id: article.id,
                        name: Some(comment.name),
                        email: Some(comment.email),
                        body: Some(comment.body),
                    })
                    .await?;
                report.comments += 1;
            }
        }

        tracing::info!(
            articles = report.articles,
            comments = report.comments,
            "seed content loaded"
        );
        Ok(report)
    }
}
