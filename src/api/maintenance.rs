//! Maintenance log API endpoints.

use axum::{extract::State, http::StatusCode, Json};

use super::{ApiJson, ApiResult};
use crate::models::{CreateMaintenanceRequest, CreatedResponse, Maintenance};
use crate::AppState;

/// GET /api/maintenance - List all maintenance with equipment names.
pub async fn list_maintenance(State(state): State<AppState>) -> ApiResult<Json<Vec<Maintenance>>> {
    Ok(Json(state.repo.list_maintenance().await?))
}

/// POST /api/maintenance - Log maintenance against existing equipment.
pub async fn create_maintenance(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateMaintenanceRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let new = request.validate()?;
    let id = state.repo.create_maintenance(&new).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Maintenance record added".to_string(),
            id,
        }),
    ))
}
