use std::sync::Arc;

use crate::external::seed_source::SeedSource;
use crate::store::TransactionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub seed_source: Arc<dyn SeedSource>,
}
