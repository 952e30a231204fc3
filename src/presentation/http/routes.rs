// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, comments, search, share, stats},
    middleware::rate_limit::{RateLimitSettings, rate_limit_layer},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Router-level knobs that do not belong to the application services.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Allowed CORS origins; empty or `*` allows any origin.
    pub allowed_origins: Vec<String>,
    /// `None` disables rate limiting of form submissions.
    pub rate_limit: Option<RateLimitSettings>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let mut forms = Router::new()
        .route("/api/v1/articles/{id}/comments", post(comments::post_comment))
        .route("/api/v1/articles/{id}/share", post(share::share_article));
    if let Some(layer) = options.rate_limit.and_then(rate_limit_layer) {
        forms = forms.layer(layer);
    }

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/articles", get(articles::list_articles))
        .route(
            "/api/v1/articles/by-date/{year}/{month}/{day}/{slug}",
            get(articles::article_detail),
        )
        .route(
            "/api/v1/articles/{id}/related",
            get(articles::related_articles),
        )
        .route("/api/v1/search", get(search::search_articles))
        .route("/api/v1/stats", get(stats::blog_stats))
        .merge(forms)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
