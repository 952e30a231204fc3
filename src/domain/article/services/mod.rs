// src/domain/article/services/mod.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::article::query::Visibility;
use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleSlug, ArticleTitle, MAX_SLUG_LEN, PublishDate};
use crate::domain::errors::DomainResult;

/// Domain service producing slugs that are unique within one publish day.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub async fn generate_unique_slug(
        &self,
        title: &ArticleTitle,
        date: PublishDate,
    ) -> DomainResult<ArticleSlug> {
        let mut base = self.generator.slugify(title.as_str());
        if base.is_empty() {
            base = "article".to_string();
        }
        // Leave room for a numeric suffix.
        base.truncate(MAX_SLUG_LEN - 8);
        let base = base.trim_end_matches('-').to_string();

        let mut candidate = base.clone();
        let mut counter = 1u64;

        loop {
            let slug = ArticleSlug::new(candidate.clone())?;
            let taken = self
                .read_repo
                .find_by_date_and_slug(date, &slug, Visibility::IncludeDrafts)
                .await?
                .is_some();
            if !taken {
                return Ok(slug);
            }
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
    }
}
