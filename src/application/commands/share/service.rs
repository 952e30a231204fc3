// src/application/commands/share/service.rs
use std::sync::Arc;

use crate::{application::ports::mail::Mailer, domain::article::ArticleReadRepository};

#[derive(Debug, Clone)]
pub struct ShareSettings {
    /// Scheme and host prefixed to article paths, e.g. `https://blog.example.com`.
    pub public_base_url: String,
    /// `From` address of recommendation emails.
    pub sender: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8080".into(),
            sender: "noreply@localhost.localdomain".into(),
        }
    }
}

pub struct ShareCommandService {
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) mailer: Arc<dyn Mailer>,
    pub(super) settings: ShareSettings,
}

impl ShareCommandService {
    pub fn new(
        article_repo: Arc<dyn ArticleReadRepository>,
        mailer: Arc<dyn Mailer>,
        settings: ShareSettings,
    ) -> Self {
        Self {
            article_repo,
            mailer,
            settings,
        }
    }

    pub(super) fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.public_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
