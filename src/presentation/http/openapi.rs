// src/presentation/http/openapi.rs
use crate::application::dto::{ArticleDto, Page};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::article_detail,
        crate::presentation::http::controllers::articles::related_articles,
        crate::presentation::http::controllers::comments::post_comment,
        crate::presentation::http::controllers::share::share_article,
        crate::presentation::http::controllers::search::search_articles,
        crate::presentation::http::controllers::stats::blog_stats,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            Page<ArticleDto>,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::comments::CommentRequest,
            crate::presentation::http::controllers::share::ShareRequest,
            crate::application::forms::FormErrors,
            crate::application::dto::ArticleDto,
            crate::application::dto::AuthorDto,
            crate::application::dto::TagDto,
            crate::application::dto::ArticleDetailDto,
            crate::application::dto::CommentDto,
            crate::application::dto::SearchResultsDto,
            crate::application::dto::SearchHitDto,
            crate::application::dto::ShareReceiptDto,
            crate::application::dto::BlogStatsDto,
            crate::application::dto::CommentedArticleDto
        )
    ),
    tags(
        (name = "Articles", description = "Published article feed, detail and statistics"),
        (name = "Comments", description = "Reader comments"),
        (name = "Share", description = "Recommend an article by email"),
        (name = "Search", description = "Relevance search over titles and bodies"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Bitacora API",
        description = "Tagged article publishing backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == "http://localhost:8080") {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// Swagger UI at `/docs` (which also serves `/openapi.json`) and Redoc at `/redoc`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn write_openapi_snapshot(output_path: &Path) -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
