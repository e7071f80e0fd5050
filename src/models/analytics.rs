use serde::{Deserialize, Serialize};

use super::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total_transactions: u64,
    pub total_pages: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sales: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    pub range: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

// Everything the dashboard needs for one month in a single payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub transactions: TransactionPage,
    pub statistics: Statistics,
    pub bar_chart: Vec<PriceRangeCount>,
    pub pie_chart: Vec<CategoryCount>,
}
