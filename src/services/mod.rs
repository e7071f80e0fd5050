pub mod analytics_service;
pub mod month_filter;
pub mod seed_service;
pub mod transaction_service;
