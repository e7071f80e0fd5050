use tracing::error;

use crate::errors::AppError;
use crate::models::TransactionPage;
use crate::services::month_filter::MonthFilter;
use crate::store::{SearchTerm, TransactionFilter, TransactionStore};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page == 0 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(AppError::Validation(format!(
                "perPage must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        Ok(Self { page, per_page })
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

/// One page of a month's transactions, optionally narrowed by a search.
pub async fn list(
    store: &dyn TransactionStore,
    month: MonthFilter,
    search: Option<&str>,
    page: &PageRequest,
) -> Result<TransactionPage, AppError> {
    let filter = TransactionFilter::for_month(month).with_search(search.and_then(SearchTerm::new));

    let transactions = store
        .find_page(&filter, page.skip(), page.per_page)
        .await
        .map_err(|e| {
            error!("Failed to fetch transactions for {}: {}", month, e);
            AppError::Store(e)
        })?;

    let total = store.count(&filter).await.map_err(|e| {
        error!("Failed to count transactions for {}: {}", month, e);
        AppError::Store(e)
    })?;

    Ok(TransactionPage {
        transactions,
        total_transactions: total,
        total_pages: page.total_pages(total),
        page: page.page,
        per_page: page.per_page,
    })
}
