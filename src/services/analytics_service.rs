use std::collections::HashMap;

use tracing::error;

use crate::errors::AppError;
use crate::models::{CategoryCount, CombinedReport, PriceRangeCount, Statistics, Transaction};
use crate::services::month_filter::MonthFilter;
use crate::services::transaction_service::{self, PageRequest};
use crate::store::{TransactionFilter, TransactionStore};

/// Histogram buckets as (label, inclusive upper bound).
pub const PRICE_BUCKETS: [(&str, f64); 10] = [
    ("0-100", 100.0),
    ("101-200", 200.0),
    ("201-300", 300.0),
    ("301-400", 400.0),
    ("401-500", 500.0),
    ("501-600", 600.0),
    ("601-700", 700.0),
    ("701-800", 800.0),
    ("801-900", 900.0),
    ("901-above", f64::INFINITY),
];

/// Index of the bucket a price falls in; negative and NaN prices have none.
pub fn price_bucket(price: f64) -> Option<usize> {
    if price.is_nan() || price < 0.0 {
        return None;
    }
    PRICE_BUCKETS.iter().position(|(_, upper)| price <= *upper)
}

pub fn compute_statistics(transactions: &[Transaction]) -> Statistics {
    let (total_sales, sold) = transactions
        .iter()
        .filter(|t| t.sold)
        .fold((0.0, 0u64), |(sum, n), t| (sum + t.price, n + 1));

    Statistics {
        total_sales,
        total_sold_items: sold,
        total_not_sold_items: transactions.len() as u64 - sold,
    }
}

pub fn compute_price_ranges(transactions: &[Transaction]) -> Vec<PriceRangeCount> {
    let mut counts = [0u64; PRICE_BUCKETS.len()];
    for idx in transactions.iter().filter_map(|t| price_bucket(t.price)) {
        counts[idx] += 1;
    }

    PRICE_BUCKETS
        .iter()
        .zip(counts)
        .map(|((label, _), count)| PriceRangeCount {
            range: label.to_string(),
            count,
        })
        .collect()
}

// Categories come out in the order they first appear.
pub fn compute_categories(transactions: &[Transaction]) -> Vec<CategoryCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for t in transactions {
        match positions.get(t.category.as_str()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                positions.insert(t.category.as_str(), counts.len());
                counts.push(CategoryCount {
                    category: t.category.clone(),
                    count: 1,
                });
            }
        }
    }
    counts
}

async fn month_transactions(
    store: &dyn TransactionStore,
    month: MonthFilter,
) -> Result<Vec<Transaction>, AppError> {
    store
        .find(&TransactionFilter::for_month(month))
        .await
        .map_err(|e| {
            error!("Failed to fetch transactions for {}: {}", month, e);
            AppError::Store(e)
        })
}

pub async fn statistics(store: &dyn TransactionStore, month: MonthFilter) -> Result<Statistics, AppError> {
    let transactions = month_transactions(store, month).await?;
    Ok(compute_statistics(&transactions))
}

pub async fn price_ranges(
    store: &dyn TransactionStore,
    month: MonthFilter,
) -> Result<Vec<PriceRangeCount>, AppError> {
    let transactions = month_transactions(store, month).await?;
    Ok(compute_price_ranges(&transactions))
}

pub async fn categories(
    store: &dyn TransactionStore,
    month: MonthFilter,
) -> Result<Vec<CategoryCount>, AppError> {
    let transactions = month_transactions(store, month).await?;
    Ok(compute_categories(&transactions))
}

/// Run the listing, statistics and both charts for one month side by side.
///
/// The four reads are independent; a reseed landing between them shows up
/// as a mix of old and new data.
pub async fn combined(store: &dyn TransactionStore, month: MonthFilter) -> Result<CombinedReport, AppError> {
    let page = PageRequest::default();

    let (transactions, statistics, bar_chart, pie_chart) = tokio::try_join!(
        transaction_service::list(store, month, None, &page),
        statistics(store, month),
        price_ranges(store, month),
        categories(store, month),
    )?;

    Ok(CombinedReport {
        transactions,
        statistics,
        bar_chart,
        pie_chart,
    })
}
