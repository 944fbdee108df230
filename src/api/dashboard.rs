//! Derived fleet health endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::health;
use crate::models::{Alert, DashboardSummary};
use crate::AppState;

/// GET /api/alerts - Equipment in the Warning or Critical band.
pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<Alert>>> {
    let equipment = state.repo.list_equipment().await?;
    Ok(Json(health::alerts(&equipment)))
}

/// GET /api/dashboard-summary - Status counts across the fleet.
pub async fn dashboard_summary(State(state): State<AppState>) -> ApiResult<Json<DashboardSummary>> {
    let equipment = state.repo.list_equipment().await?;
    Ok(Json(health::summarize(&equipment)))
}
