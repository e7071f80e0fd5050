//! In-memory implementation of `TransactionStore` for testing

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{StoreError, TransactionFilter, TransactionStore};
use crate::models::Transaction;

/// Keeps records in insertion order, like the `seq` column of the
/// Postgres table, so pagination behaves the same way.
#[derive(Default)]
pub struct InMemoryTransactionStore {
    records: RwLock<Vec<Transaction>>,
    unavailable: AtomicBool,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Transaction>) -> Self {
        Self {
            records: RwLock::new(records),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail, to exercise error paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn replace_all(&self, records: Vec<Transaction>) -> Result<u64, StoreError> {
        self.check_available()?;
        let inserted = records.len() as u64;
        *self.records.write() = records;
        Ok(inserted)
    }

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, StoreError> {
        self.check_available()?;
        let records = self.records.read();
        Ok(records.iter().filter(|tx| filter.matches(tx)).count() as u64)
    }

    async fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError> {
        self.check_available()?;
        let records = self.records.read();
        Ok(records.iter().filter(|tx| filter.matches(tx)).cloned().collect())
    }

    async fn find_page(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.check_available()?;
        let records = self.records.read();
        Ok(records
            .iter()
            .filter(|tx| filter.matches(tx))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        self.check_available()?;
        Ok(self.records.read().len() as u64)
    }
}
