use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use super::{StoreError, TransactionFilter, TransactionStore};
use crate::config::DatabaseConfig;
use crate::db::transaction_queries;
use crate::models::Transaction;

pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let statement_timeout = format!("{}", config.timeout.as_millis());
        let options: PgConnectOptions = config
            .url
            .parse::<PgConnectOptions>()?
            .options([("statement_timeout", statement_timeout.as_str())]);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.timeout)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {}", e)))?;

        info!(
            "Connected to transaction store (max {} connections)",
            config.max_connections
        );
        Ok(Self::new(pool))
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn replace_all(&self, records: Vec<Transaction>) -> Result<u64, StoreError> {
        Ok(transaction_queries::replace_all(&self.pool, &records).await?)
    }

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, StoreError> {
        let total = transaction_queries::count(&self.pool, filter).await?;
        Ok(total.max(0) as u64)
    }

    async fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError> {
        Ok(transaction_queries::fetch_matching(&self.pool, filter).await?)
    }

    async fn find_page(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(transaction_queries::fetch_page(&self.pool, filter, to_i64(skip), to_i64(limit)).await?)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        let total = transaction_queries::count_all(&self.pool).await?;
        Ok(total.max(0) as u64)
    }

    async fn close(&self) {
        info!("Closing transaction store connections");
        self.pool.close().await;
    }
}

