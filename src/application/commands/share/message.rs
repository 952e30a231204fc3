// src/application/commands/share/message.rs
use super::ShareCommandService;
use crate::{
    application::{
        dto::ShareReceiptDto,
        error::{ApplicationError, ApplicationResult},
        forms::FormErrors,
        ports::mail::OutgoingMail,
    },
    domain::{
        article::{ArticleId, Visibility},
        contact::EmailAddress,
        errors::{DomainError, DomainResult},
    },
};

pub const MAX_SHARER_NAME_LEN: usize = 25;

#[derive(Debug, Clone, Default)]
pub struct ShareArticleCommand {
    pub article_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub to: Option<String>,
    pub comments: Option<String>,
}

fn sharer_name(value: String) -> DomainResult<String> {
    let value = value.trim().to_string();
    if value.chars().count() > MAX_SHARER_NAME_LEN {
        return Err(DomainError::Validation(format!(
            "name must be at most {MAX_SHARER_NAME_LEN} characters"
        )));
    }
    Ok(value)
}

impl ShareCommandService {
    /// Emails a recommendation of a Published article to one recipient.
    pub async fn share_article(
        &self,
        command: ShareArticleCommand,
    ) -> ApplicationResult<ShareReceiptDto> {
        let article_id = ArticleId::new(command.article_id)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        let article = self
            .article_repo
            .find_by_id(article_id, Visibility::Published)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let mut errors = FormErrors::new();
        let name = errors
            .required("name", command.name)
            .and_then(|value| errors.field("name", sharer_name(value)));
        // Validated only; mail goes out from the configured sender.
        let email = errors
            .required("email", command.email)
            .and_then(|value| errors.field("email", EmailAddress::new(value)));
        let to = errors
            .required("to", command.to)
            .and_then(|value| errors.field("to", EmailAddress::new(value)));
        let (Some(name), Some(_), Some(to)) = (name, email, to) else {
            return Err(ApplicationError::InvalidForm(errors));
        };
        let comments = command.comments.unwrap_or_default();

        let url = self.absolute_url(&article.date_path());
        let subject = format!("{name} recommends you read {}", article.title);
        let body = format!(
            "Read {} at {url}\n\n{name}'s comments: {comments}",
            article.title
        );

        self.mailer
            .send(OutgoingMail {
                subject: subject.clone(),
                body,
                sender: self.settings.sender.clone(),
                recipients: vec![to.as_str().to_string()],
            })
            .await?;
        tracing::info!(article_id = %article_id, "article shared by email");

        Ok(ShareReceiptDto {
            sent: true,
            to: to.as_str().to_string(),
            subject,
        })
    }
}
