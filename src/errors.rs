use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::seed_source::SeedSourceError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Seed source error: {0}")]
    Seed(#[from] SeedSourceError),
    #[error("Validation error: {0}")]
    Validation(String),
    // Handler-level failure, rendered with a fixed message.
    #[error("{0}")]
    Failed(&'static str),
}

impl AppError {
    /// Collapse any cause except bad input into the handler's static message.
    pub fn or_failed(self, message: &'static str) -> Self {
        match self {
            AppError::Validation(_) | AppError::Failed(_) => self,
            _ => AppError::Failed(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Failed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
            AppError::Store(_) | AppError::Seed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
