// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            articles::ArticleCommandService,
            comments::CommentCommandService,
            share::{ShareCommandService, ShareSettings},
        },
        ports::{mail::Mailer, time::Clock, util::SlugGenerator},
        queries::articles::{ArticleQueryService, ArticleQuerySettings},
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
        comment::CommentRepository,
        tag::TagRepository,
    },
};

/// Tunables handed down from configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceSettings {
    pub queries: ArticleQuerySettings,
    pub share: ShareSettings,
}

/// Storage backends the services are wired against.
pub struct Repositories {
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
}

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub share_commands: Arc<ShareCommandService>,
}

impl ApplicationServices {
    pub fn new(
        repositories: Repositories,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        let Repositories {
            article_write,
            article_read,
            comments,
            tags,
        } = repositories;

        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&article_read),
            Arc::clone(&slugger),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write),
            Arc::clone(&article_read),
            slug_service,
            slugger,
            Arc::clone(&clock),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read),
            Arc::clone(&comments),
            tags,
            settings.queries,
        ));

        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&article_read),
            comments,
            clock,
        ));

        let share_commands = Arc::new(ShareCommandService::new(
            article_read,
            mailer,
            settings.share,
        ));

        Self {
            article_commands,
            article_queries,
            comment_commands,
            share_commands,
        }
    }
}
