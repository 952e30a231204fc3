// src/application/commands/comments/post.rs
use super::CommentCommandService;
use crate::{
    application::{
        dto::CommentDto,
        error::{ApplicationError, ApplicationResult},
        forms::FormErrors,
    },
    domain::{
        article::{ArticleId, Visibility},
        comment::{CommentBody, CommenterName, NewComment},
        contact::EmailAddress,
    },
};

#[derive(Debug, Clone, Default)]
pub struct PostCommentCommand {
    pub article_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub body: Option<String>,
}

impl CommentCommandService {
    /// Attaches an active comment to a Published article. The article is
    /// resolved before the form is looked at.
    pub async fn post_comment(&self, command: PostCommentCommand) -> ApplicationResult<CommentDto> {
        let article_id = ArticleId::new(command.article_id)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        self.article_repo
            .find_by_id(article_id, Visibility::Published)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let mut errors = FormErrors::new();
        let name = errors
            .required("name", command.name)
            .and_then(|value| errors.field("name", CommenterName::new(value)));
        let email = errors
            .required("email", command.email)
            .and_then(|value| errors.field("email", EmailAddress::new(value)));
        let body = errors
            .required("body", command.body)
            .and_then(|value| errors.field("body", CommentBody::new(value)));

        let (Some(name), Some(email), Some(body)) = (name, email, body) else {
            return Err(ApplicationError::InvalidForm(errors));
        };

        let comment = self
            .comment_repo
            .insert(NewComment {
                article_id,
                name,
                email,
                body,
                active: true,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(article_id = %article_id, comment_id = i64::from(comment.id), "comment posted");
        Ok(comment.into())
    }
}
