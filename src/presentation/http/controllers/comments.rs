// src/presentation/http/controllers/comments.rs
use crate::application::{commands::comments::PostCommentCommand, dto::CommentDto};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub body: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/comments",
    params(("id" = i64, Path, description = "Article id")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created.", body = CommentDto),
        (status = 404, description = "Article not found.", body = ErrorResponse),
        (status = 422, description = "Invalid form.", body = ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn post_comment(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<CommentRequest>,
) -> HttpResult<(StatusCode, Json<CommentDto>)> {
    let command = PostCommentCommand {
        article_id: id,
        name: payload.name,
        email: payload.email,
        body: payload.body,
    };

    state
        .services
        .comment_commands
        .post_comment(command)
        .await
        .into_http()
        .map(|comment| (StatusCode::CREATED, Json(comment)))
}
