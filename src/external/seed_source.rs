use async_trait::async_trait;
use thiserror::Error;

use crate::models::SeedRecord;

#[derive(Debug, Error)]
pub enum SeedSourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Where the seed dataset comes from.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<SeedRecord>, SeedSourceError>;
}
