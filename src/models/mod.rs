mod analytics;
mod transaction;

pub use analytics::{CategoryCount, CombinedReport, PriceRangeCount, Statistics, TransactionPage};
pub use transaction::{SeedRecord, Transaction};
