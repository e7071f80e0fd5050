pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Transaction;
use crate::services::month_filter::MonthFilter;

pub use memory::InMemoryTransactionStore;
pub use postgres::PgTransactionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Free-text search over a month's records.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    price: Option<f64>,
}

impl SearchTerm {
    /// Returns `None` for blank input, meaning "no search clause".
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let price = text.parse::<f64>().ok().filter(|p| p.is_finite());
        Some(Self {
            text: text.to_string(),
            price,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set when the search text is itself a number; matches records with that exact price.
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// `ILIKE` pattern matching the text literally anywhere in a column.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.text.len() + 2);
        pattern.push('%');
        for c in self.text.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.text.to_lowercase();
        tx.title.to_lowercase().contains(&needle)
            || tx.description.to_lowercase().contains(&needle)
            || self.price.is_some_and(|p| tx.price == p)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub month: MonthFilter,
    pub search: Option<SearchTerm>,
}

impl TransactionFilter {
    pub fn for_month(month: MonthFilter) -> Self {
        Self { month, search: None }
    }

    pub fn with_search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.month.matches(tx.date_of_sale.as_ref())
            && self.search.as_ref().map_or(true, |s| s.matches(tx))
    }
}

/// Persistence for transaction records.
///
/// Records are only ever written in bulk by `replace_all`; everything else
/// is a read scoped by a `TransactionFilter`.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Drop every stored record and insert `records` in their place.
    async fn replace_all(&self, records: Vec<Transaction>) -> Result<u64, StoreError>;

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, StoreError>;

    async fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError>;

    /// Matching records in insertion order, after skipping `skip` of them.
    async fn find_page(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError>;

    async fn count_all(&self) -> Result<u64, StoreError>;

    async fn close(&self) {}
}
