use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_editor::config::Config;
use resume_editor::draft::{DraftBackend, MemoryBackend, RestBackend};
use resume_editor::routes::build_router;
use resume_editor::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume editor API v{}", env!("CARGO_PKG_VERSION"));

    let backend = build_backend(&config)?;

    let state = AppState {
        backend,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the REST document service when `BACKEND_URL` is set, otherwise an
/// in-process store.
fn build_backend(config: &Config) -> Result<Arc<dyn DraftBackend>> {
    match &config.backend_url {
        Some(url) => {
            let backend = RestBackend::new(
                url.clone(),
                Duration::from_secs(config.backend_timeout_secs),
                config.backend_max_retries,
            )?;
            info!(
                "Document backend: {url} (timeout {}s, up to {} retries)",
                config.backend_timeout_secs, config.backend_max_retries
            );
            Ok(Arc::new(backend))
        }
        None => {
            warn!("BACKEND_URL not set; drafts are saved in memory and lost on restart");
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}
