use anyhow::{Context, Result};
use bitacora::application::{
    ports::{mail::Mailer, time::Clock, util::SlugGenerator},
    services::{ApplicationServices, Repositories},
};
use bitacora::config::{AppConfig, MailBackend, StorageBackend};
use bitacora::infrastructure::{
    database,
    mail::{LogMailer, RelayMailer},
    repositories::{
        InMemoryStore, PostgresArticleReadRepository, PostgresArticleWriteRepository,
        PostgresCommentRepository, PostgresTagRepository,
    },
    seed::SeedFile,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use bitacora::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let mailer: Arc<dyn Mailer> = match config.mail() {
        MailBackend::Log => Arc::new(LogMailer),
        MailBackend::Relay { url } => Arc::new(RelayMailer::new(url.clone())?),
    };

    let services = match config.storage() {
        StorageBackend::Postgres => {
            let pool = database::init_pool(config.database_url())
                .await
                .context("connecting to postgres")?;
            database::run_migrations(&pool).await?;

            let repositories = Repositories {
                article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
                article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
                comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
                tags: Arc::new(PostgresTagRepository::new(pool)),
            };
            Arc::new(ApplicationServices::new(
                repositories,
                mailer,
                clock,
                slugger,
                config.services().clone(),
            ))
        }
        StorageBackend::Memory => {
            let store = Arc::new(InMemoryStore::new());
            let repositories = Repositories {
                article_write: store.clone(),
                article_read: store.clone(),
                comments: store.clone(),
                tags: store.clone(),
            };
            let services = Arc::new(ApplicationServices::new(
                repositories,
                mailer,
                clock,
                slugger,
                config.services().clone(),
            ));

            if let Some(path) = config.seed_file() {
                let seed = SeedFile::read(path).await?;
                seed.apply(&services, store.as_ref()).await?;
            } else {
                tracing::warn!("in-memory storage without SEED_FILE starts empty");
            }
            services
        }
    };

    let state = HttpState {
        services: Arc::clone(&services),
    };
    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        rate_limit: Some(config.rate_limit()),
    };

    let app = build_router(state, &options);
    let service = app.into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(storage = ?config.storage(), "listening on {address}");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
