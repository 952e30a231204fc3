// src/presentation/http/controllers/share.rs
use crate::application::{commands::share::ShareArticleCommand, dto::ShareReceiptDto};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ShareRequest {
    /// Sender's name, at most 25 characters.
    pub name: Option<String>,
    /// Sender's email address.
    pub email: Option<String>,
    /// Recipient's email address.
    pub to: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/share",
    params(("id" = i64, Path, description = "Article id")),
    request_body = ShareRequest,
    responses(
        (status = 200, description = "Recommendation sent.", body = ShareReceiptDto),
        (status = 404, description = "Article not found.", body = ErrorResponse),
        (status = 422, description = "Invalid form.", body = ErrorResponse),
        (status = 500, description = "Mail delivery failed.", body = ErrorResponse)
    ),
    tag = "Share"
)]
pub async fn share_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<ShareRequest>,
) -> HttpResult<Json<ShareReceiptDto>> {
    let command = ShareArticleCommand {
        article_id: id,
        name: payload.name,
        email: payload.email,
        to: payload.to,
        comments: payload.comments,
    };

    state
        .services
        .share_commands
        .share_article(command)
        .await
        .into_http()
        .map(Json)
}
