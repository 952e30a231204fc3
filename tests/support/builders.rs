// tests/support/builders.rs
use super::mocks::{CountingArticleRead, FixedClock, RecordingMailer, fixed_now};
use bitacora::application::{
    commands::{articles::CreateArticleCommand, comments::PostCommentCommand},
    dto::ArticleDto,
    ports::mail::Mailer,
    services::{ApplicationServices, Repositories, ServiceSettings},
};
use bitacora::domain::{
    article::{ArticleReadRepository, ArticleStatus},
    author::AuthorDirectory,
    search::SearchSettings,
};
use bitacora::infrastructure::{repositories::InMemoryStore, util::DefaultSlugGenerator};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Services wired against one in-memory store, with observable mail and
/// store traffic.
pub struct TestBlog {
    pub store: Arc<InMemoryStore>,
    pub reads: Arc<CountingArticleRead>,
    pub mailer: Arc<RecordingMailer>,
    pub services: Arc<ApplicationServices>,
}

impl TestBlog {
    pub fn new() -> Self {
        Self::with_settings(ServiceSettings::default())
    }

    pub fn with_search(search: SearchSettings) -> Self {
        let mut settings = ServiceSettings::default();
        settings.queries.search = search;
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: ServiceSettings) -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        Self::build(settings, Arc::clone(&mailer) as Arc<dyn Mailer>, mailer)
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self::build(
            ServiceSettings::default(),
            mailer,
            Arc::new(RecordingMailer::default()),
        )
    }

    fn build(
        settings: ServiceSettings,
        mailer: Arc<dyn Mailer>,
        recorder: Arc<RecordingMailer>,
    ) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let reads = Arc::new(CountingArticleRead::new(
            Arc::clone(&store) as Arc<dyn ArticleReadRepository>
        ));
        let services = Arc::new(ApplicationServices::new(
            Repositories {
                article_write: store.clone(),
                article_read: reads.clone(),
                comments: store.clone(),
                tags: store.clone(),
            },
            mailer,
            Arc::new(FixedClock),
            Arc::new(DefaultSlugGenerator),
            settings,
        ));
        Self {
            store,
            reads,
            mailer: recorder,
            services,
        }
    }

    pub fn article(&self) -> ArticleSpec<'_> {
        ArticleSpec::new(self)
    }

    pub async fn comment(&self, article_id: i64, name: &str, body: &str) {
        self.services
            .comment_commands
            .post_comment(PostCommentCommand {
                article_id,
                name: Some(name.into()),
                email: Some("reader@example.com".into()),
                body: Some(body.into()),
            })
            .await
            .expect("post comment");
    }
}

/// Fluent description of an article to create through the command service.
pub struct ArticleSpec<'a> {
    blog: &'a TestBlog,
    title: String,
    body: String,
    author: String,
    status: ArticleStatus,
    publish_at: DateTime<Utc>,
    tags: Vec<String>,
}

impl<'a> ArticleSpec<'a> {
    fn new(blog: &'a TestBlog) -> Self {
        Self {
            blog,
            title: "Artículo de prueba".into(),
            body: "Texto de prueba".into(),
            author: "admin".into(),
            status: ArticleStatus::Published,
            publish_at: fixed_now(),
            tags: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn draft(mut self) -> Self {
        self.status = ArticleStatus::Draft;
        self
    }

    pub fn at(mut self, publish_at: DateTime<Utc>) -> Self {
        self.publish_at = publish_at;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }

    pub async fn create(self) -> ArticleDto {
        let author = self
            .blog
            .store
            .ensure(&self.author)
            .await
            .expect("ensure author");
        let command = CreateArticleCommand::builder()
            .title(self.title)
            .body(self.body)
            .author(author.id.into())
            .status(self.status)
            .publish_at(self.publish_at)
            .tags(self.tags)
            .build()
            .expect("complete command");
        self.blog
            .services
            .article_commands
            .create_article(command)
            .await
            .expect("create article")
    }
}
