// src/presentation/http/controllers/stats.rs
use crate::application::{dto::BlogStatsDto, queries::articles::BlogStatsQuery};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsParams {
    /// How many latest articles to include (default 5).
    #[serde(default)]
    pub latest: Option<u64>,
    /// How many most commented articles to include (default 5).
    #[serde(default)]
    pub most_commented: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/stats",
    params(StatsParams),
    responses(
        (status = 200, description = "Publishing statistics.", body = BlogStatsDto)
    ),
    tag = "Articles"
)]
pub async fn blog_stats(
    Extension(state): Extension<HttpState>,
    Query(params): Query<StatsParams>,
) -> HttpResult<Json<BlogStatsDto>> {
    state
        .services
        .article_queries
        .blog_stats(BlogStatsQuery {
            latest: params.latest,
            most_commented: params.most_commented,
        })
        .await
        .into_http()
        .map(Json)
}
