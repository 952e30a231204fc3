// src/application/commands/articles/status.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleId, ArticleStatus, ArticleStatusUpdate, Visibility},
};

pub struct SetArticleStatusCommand {
    pub id: i64,
    pub status: ArticleStatus,
}

impl ArticleCommandService {
    pub async fn set_article_status(
        &self,
        command: SetArticleStatusCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self
            .read_repo
            .find_by_id(id, Visibility::IncludeDrafts)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if article.status == command.status {
            return Ok(article.into());
        }

        let original_updated_at = article.updated_at;
        let now = self.clock.now();
        match command.status {
            ArticleStatus::Published => article.publish(now),
            ArticleStatus::Draft => article.unpublish(now),
        }

        let updated = self
            .write_repo
            .update_status(ArticleStatusUpdate {
                id,
                status: article.status,
                original_updated_at,
                updated_at: article.updated_at,
            })
            .await?;
        tracing::info!(article_id = %id, status = %updated.status, "article status changed");
        Ok(updated.into())
    }
}
