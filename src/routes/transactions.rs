use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::TransactionPage;
use crate::services::month_filter::MonthFilter;
use crate::services::transaction_service::{self, PageRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    search: Option<String>,
    page: Option<u64>,
    per_page: Option<u64>,
    month: Option<String>,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<TransactionPage>, AppError> {
    info!(
        "GET /api/transactions - month={:?} search={:?} page={:?} perPage={:?}",
        params.month, params.search, params.page, params.per_page
    );

    let month = MonthFilter::from_param(params.month.as_deref())?;
    let page = PageRequest::new(params.page, params.per_page)?;

    let result = transaction_service::list(state.store.as_ref(), month, params.search.as_deref(), &page)
        .await
        .map_err(|e| {
            error!("Failed to list transactions for {}: {}", month, e);
            e.or_failed("Error fetching transactions")
        })?;

    Ok(Json(result))
}
