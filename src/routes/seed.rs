use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tracing::{error, info};

use crate::errors::AppError;
use crate::services::seed_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/init", get(init_database))
}

pub async fn init_database(State(state): State<AppState>) -> Result<&'static str, AppError> {
    info!("GET /api/init - Reseeding transactions");

    let inserted = seed_service::reseed(state.store.as_ref(), state.seed_source.as_ref())
        .await
        .map_err(|e| {
            error!("Failed to initialize database: {}", e);
            e.or_failed("Error initializing database")
        })?;

    info!("Database initialized with {} transactions", inserted);
    Ok("Database initialized with seed data")
}
