//! Text Simplifier Server
//!
//! Simplifies text to a target reading level with a language model, caching
//! results and reporting readability scores and an inline diff.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simplify_server::config::Config;
use simplify_server::db::{self, ResultCache};
use simplify_server::llm::GeminiProvider;
use simplify_server::routes;
use simplify_server::simplify::Simplifier;
use simplify_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "simplify_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Refusing to start")?;

    tracing::info!("Starting Text Simplifier Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Model: {}", config.provider.model);

    // Initialize cache database
    let db_pool = db::create_pool(&config.database.url)
        .await
        .context("Failed to initialize cache database")?;
    tracing::info!("Cache database initialized at {}", config.database.url);

    let model = GeminiProvider::new(&config.provider).context("Failed to build model client")?;
    let simplifier = Simplifier::new(
        Arc::new(model),
        ResultCache::new(db_pool.clone()),
        config.provider.timeout(),
    );

    let app = routes::app(AppState::new(simplifier));

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid SERVER_HOST/SERVER_PORT")?;
    tracing::info!("Text Simplifier Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
