use async_trait::async_trait;
use tracing::info;

use crate::config::SeedConfig;
use crate::external::seed_source::{SeedSource, SeedSourceError};
use crate::models::SeedRecord;

/// Downloads the seed dataset as a JSON array over HTTP.
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(config: &SeedConfig) -> Result<Self, SeedSourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SeedSourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch_records(&self) -> Result<Vec<SeedRecord>, SeedSourceError> {
        info!("Fetching seed dataset from {}", self.url);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SeedSourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SeedSourceError::BadResponse(format!(
                "seed endpoint returned status: {}",
                status
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| SeedSourceError::Network(e.to_string()))?;

        parse_records(&body)
    }
}

pub(crate) fn parse_records(body: &[u8]) -> Result<Vec<SeedRecord>, SeedSourceError> {
    serde_json::from_slice::<Vec<SeedRecord>>(body)
        .map_err(|e| SeedSourceError::Parse(e.to_string()))
}
