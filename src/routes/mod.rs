pub(crate) mod analytics;
pub(crate) mod health;
pub(crate) mod seed;
pub(crate) mod transactions;
