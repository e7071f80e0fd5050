use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use salesboard::app;
use salesboard::config::AppConfig;
use salesboard::external::http_seed::HttpSeedSource;
use salesboard::logging;
use salesboard::state::AppState;
use salesboard::store::{PgTransactionStore, TransactionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    // Initialize logging FIRST
    logging::init_logging(&config.logging).map_err(|e| anyhow::anyhow!(e))?;

    let store: Arc<dyn TransactionStore> = Arc::new(
        PgTransactionStore::connect(&config.database)
            .await
            .context("Failed to connect to the transaction store")?,
    );
    let seed_source = Arc::new(
        HttpSeedSource::new(&config.seed).context("Failed to build seed HTTP client")?,
    );

    let state = AppState {
        store: store.clone(),
        seed_source,
    };
    let app = app::create_app(state);

    let addr = config.server.addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Transaction backend running at http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining requests");
}
