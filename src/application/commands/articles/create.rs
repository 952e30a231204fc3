// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleBody, ArticleStatus, ArticleTitle, NewArticle, PublishDate},
        author::AuthorId,
        tag::{NewTag, TagName, TagSlug},
    },
};
use chrono::{DateTime, Utc};

pub struct CreateArticleCommand {
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub status: ArticleStatus,
    pub publish_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    body: Option<String>,
    author_id: Option<i64>,
    status: ArticleStatus,
    publish_at: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn status(mut self, status: ArticleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn published(self) -> Self {
        self.status(ArticleStatus::Published)
    }

    pub fn publish_at(mut self, at: DateTime<Utc>) -> Self {
        self.publish_at = Some(at);
        self
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    pub fn tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            body: self.body.ok_or("body is required")?,
            author_id: self.author_id.ok_or("author is required")?,
            status: self.status,
            publish_at: self.publish_at,
            tags: self.tags,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(&self, command: CreateArticleCommand) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let author_id = AuthorId::new(command.author_id)?;
        let tags = self.prepare_tags(command.tags)?;

        let now = self.clock.now();
        let publish_at = command.publish_at.unwrap_or(now);
        let slug = self
            .slug_service
            .generate_unique_slug(&title, PublishDate::from(publish_at.date_naive()))
            .await?;

        let new_article = NewArticle {
            title,
            slug,
            body,
            status: command.status,
            author_id,
            publish_at,
            created_at: now,
            updated_at: now,
            tags,
        };

        let created = self.write_repo.insert(new_article).await?;
        tracing::info!(
            article_id = %created.id,
            path = %created.date_path(),
            status = %created.status,
            "article created"
        );
        Ok(created.into())
    }

    /// Slugifies tag names and drops repeats, keeping the first spelling.
    fn prepare_tags(&self, names: Vec<String>) -> ApplicationResult<Vec<NewTag>> {
        let mut tags: Vec<NewTag> = Vec::with_capacity(names.len());
        for raw in names {
            let name = TagName::new(raw)?;
            let slug = self.slugger.slugify(name.as_str());
            if slug.is_empty() {
                return Err(ApplicationError::validation(format!(
                    "tag `{name}` has no URL-safe characters"
                )));
            }
            let slug = TagSlug::new(slug)?;
            if tags.iter().all(|tag| tag.slug != slug) {
                tags.push(NewTag { name, slug });
            }
        }
        Ok(tags)
    }
}
