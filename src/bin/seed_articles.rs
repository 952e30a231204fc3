// src/bin/seed_articles.rs
//! Imports a JSON content file into the configured PostgreSQL database.
//!
//! Usage: `seed_articles [path]`, defaulting to `SEED_FILE` or `demos/seed.json`.
use anyhow::{Context, Result};
use bitacora::application::services::{ApplicationServices, Repositories};
use bitacora::config::AppConfig;
use bitacora::infrastructure::{
    database,
    mail::LogMailer,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository, PostgresAuthorDirectory,
        PostgresCommentRepository, PostgresTagRepository,
    },
    seed::SeedFile,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use std::{env, path::PathBuf, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".into()),
        ))
        .init();

    let config = AppConfig::from_env()?;
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.seed_file().cloned())
        .unwrap_or_else(|| PathBuf::from("demos/seed.json"));

    let seed = SeedFile::read(&path).await?;

    let pool = database::init_pool(config.database_url())
        .await
        .context("connecting to postgres")?;
    database::run_migrations(&pool).await?;

    let services = ApplicationServices::new(
        Repositories {
            article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
            article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
            tags: Arc::new(PostgresTagRepository::new(pool.clone())),
        },
        Arc::new(LogMailer),
        Arc::new(SystemClock),
        Arc::new(DefaultSlugGenerator),
        config.services().clone(),
    );
    let authors = PostgresAuthorDirectory::new(pool);

    let report = seed.apply(&services, &authors).await?;
    println!(
        "imported {} articles and {} comments from {}",
        report.articles,
        report.comments,
        path.display()
    );
    Ok(())
}
