// src/presentation/http/controllers/search.rs
use crate::application::{dto::SearchResultsDto, queries::articles::SearchArticlesQuery};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free text; blank or missing returns no hits.
    #[serde(default)]
    pub query: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Published articles above the relevance threshold, best first.", body = SearchResultsDto)
    ),
    tag = "Search"
)]
pub async fn search_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<SearchParams>,
) -> HttpResult<Json<SearchResultsDto>> {
    state
        .services
        .article_queries
        .search_articles(SearchArticlesQuery {
            query: params.query,
        })
        .await
        .into_http()
        .map(Json)
}
