use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{analytics, health, seed, transactions};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let api = Router::<AppState>::new()
        .merge(seed::router())
        .merge(transactions::router())
        .merge(analytics::router());

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api", api)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
