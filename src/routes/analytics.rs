use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CategoryCount, CombinedReport, PriceRangeCount, Statistics};
use crate::services::analytics_service;
use crate::services::month_filter::MonthFilter;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/statistics", get(get_statistics))
        .route("/bar-chart", get(get_bar_chart))
        .route("/pie-chart", get(get_pie_chart))
        .route("/combined", get(get_combined))
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    month: Option<String>,
}

impl MonthQuery {
    fn filter(&self) -> Result<MonthFilter, AppError> {
        MonthFilter::from_param(self.month.as_deref())
    }
}

pub async fn get_statistics(
    State(state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Statistics>, AppError> {
    info!("GET /api/statistics - month={:?}", params.month);
    let month = params.filter()?;

    let stats = analytics_service::statistics(state.store.as_ref(), month)
        .await
        .map_err(|e| {
            error!("Failed to compute statistics for {}: {}", month, e);
            e.or_failed("Error fetching statistics")
        })?;
    Ok(Json(stats))
}

pub async fn get_bar_chart(
    State(state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, AppError> {
    info!("GET /api/bar-chart - month={:?}", params.month);
    let month = params.filter()?;

    let ranges = analytics_service::price_ranges(state.store.as_ref(), month)
        .await
        .map_err(|e| {
            error!("Failed to compute price ranges for {}: {}", month, e);
            e.or_failed("Error fetching bar chart data")
        })?;
    Ok(Json(ranges))
}

pub async fn get_pie_chart(
    State(state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, AppError> {
    info!("GET /api/pie-chart - month={:?}", params.month);
    let month = params.filter()?;

    let categories = analytics_service::categories(state.store.as_ref(), month)
        .await
        .map_err(|e| {
            error!("Failed to compute categories for {}: {}", month, e);
            e.or_failed("Error fetching pie chart data")
        })?;
    Ok(Json(categories))
}

pub async fn get_combined(
    State(state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<CombinedReport>, AppError> {
    info!("GET /api/combined - month={:?}", params.month);
    let month = params.filter()?;

    let report = analytics_service::combined(state.store.as_ref(), month)
        .await
        .map_err(|e| {
            error!("Failed to build combined report for {}: {}", month, e);
            e.or_failed("Error fetching combined data")
        })?;
    Ok(Json(report))
}
