// src/presentation/http/controllers/articles.rs
use crate::application::{
    dto::{ArticleDetailDto, ArticleDto, Page},
    queries::articles::{GetArticleDetailQuery, ListArticlesQuery, RelatedArticlesQuery},
};
use crate::domain::article::ArticleOrdering;
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Page number; invalid or out-of-range values are clamped.
    #[serde(default)]
    pub page: Option<String>,
    /// Restrict to articles carrying this tag slug.
    #[serde(default)]
    pub tag: Option<String>,
    /// `newest` (default) or `oldest`.
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RelatedParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

fn parse_ordering(raw: Option<&str>) -> ArticleOrdering {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        Some(value) if value == "oldest" || value == "asc" => ArticleOrdering::OldestFirst,
        _ => ArticleOrdering::NewestFirst,
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Page of Published articles.", body = Page<ArticleDto>),
        (status = 404, description = "Unknown tag.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<Page<ArticleDto>>> {
    let query = ListArticlesQuery {
        ordering: parse_ordering(params.order.as_deref()),
        page: params.page,
        tag: params.tag,
    };

    state
        .services
        .article_queries
        .list_articles(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/by-date/{year}/{month}/{day}/{slug}",
    params(
        ("year" = String, Path, description = "Publish year (UTC)"),
        ("month" = String, Path, description = "Publish month, 1-12"),
        ("day" = String, Path, description = "Publish day of month"),
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article with comments and related articles.", body = ArticleDetailDto),
        (status = 404, description = "No Published article at this address.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn article_detail(
    Extension(state): Extension<HttpState>,
    Path((year, month, day, slug)): Path<(String, String, String, String)>,
) -> HttpResult<Json<ArticleDetailDto>> {
    let not_found = |_| HttpError::not_found("article not found");
    let query = GetArticleDetailQuery {
        year: year.parse().map_err(not_found)?,
        month: month.parse().map_err(not_found)?,
        day: day.parse().map_err(not_found)?,
        slug,
    };

    state
        .services
        .article_queries
        .article_detail(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}/related",
    params(
        ("id" = i64, Path, description = "Article id"),
        RelatedParams
    ),
    responses(
        (status = 200, description = "Published articles sharing tags, best first.", body = [ArticleDto]),
        (status = 404, description = "Article not found.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn related_articles(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Query(params): Query<RelatedParams>,
) -> HttpResult<Json<Vec<ArticleDto>>> {
    state
        .services
        .article_queries
        .related_articles(RelatedArticlesQuery {
            id,
            limit: params.limit,
        })
        .await
        .into_http()
        .map(Json)
}
