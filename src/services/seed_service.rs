use tracing::{error, info};

use crate::errors::AppError;
use crate::external::seed_source::SeedSource;
use crate::models::Transaction;
use crate::store::TransactionStore;

/// Replace the whole store with a fresh copy of the seed dataset.
///
/// The dataset is fetched and decoded before anything is deleted, so a bad
/// download leaves the current records untouched.
pub async fn reseed(store: &dyn TransactionStore, source: &dyn SeedSource) -> Result<u64, AppError> {
    let records = source.fetch_records().await.map_err(|e| {
        error!("Failed to fetch seed dataset: {}", e);
        AppError::Seed(e)
    })?;

    let transactions: Vec<Transaction> = records.into_iter().map(Transaction::from).collect();
    let fetched = transactions.len();

    let inserted = store.replace_all(transactions).await.map_err(|e| {
        error!("Failed to replace stored transactions: {}", e);
        AppError::Store(e)
    })?;

    info!("Seeded {} of {} fetched transactions", inserted, fetched);
    Ok(inserted)
}
