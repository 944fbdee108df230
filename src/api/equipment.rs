//! Equipment API endpoints.

use axum::{extract::State, http::StatusCode, Json};

use super::{ApiJson, ApiPath, ApiResult};
use crate::errors::AppError;
use crate::models::{
    CreateEquipmentRequest, CreatedResponse, EquipmentView, HoursUpdatedResponse,
    MessageResponse, UpdateEquipmentRequest, UpdateHoursRequest,
};
use crate::AppState;

/// GET /api/equipment - List all equipment with computed status.
pub async fn list_equipment(State(state): State<AppState>) -> ApiResult<Json<Vec<EquipmentView>>> {
    let equipment = state.repo.list_equipment().await?;
    Ok(Json(equipment.into_iter().map(EquipmentView::from).collect()))
}

/// GET /api/equipment/{id} - Get a single piece of equipment.
pub async fn get_equipment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<EquipmentView>> {
    let equipment = state
        .repo
        .get_equipment(id)
        .await?
        .ok_or_else(|| AppError::equipment_not_found(id))?;

    Ok(Json(equipment.into()))
}

/// POST /api/equipment - Create new equipment.
pub async fn create_equipment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEquipmentRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let new = request.validate()?;
    let equipment = state.repo.create_equipment(&new).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Equipment added successfully".to_string(),
            id: equipment.id,
        }),
    ))
}

/// PUT /api/equipment/{id} - Partially update equipment.
pub async fn update_equipment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateEquipmentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let request = request.validate()?;
    state.repo.update_equipment(id, &request).await?;

    Ok(Json(MessageResponse::new("Equipment updated successfully")))
}

/// DELETE /api/equipment/{id} - Delete equipment.
pub async fn delete_equipment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.repo.delete_equipment(id).await?;

    Ok(Json(MessageResponse::new("Equipment deleted successfully")))
}

/// POST /api/equipment/{id}/update-hours - Update usage hours only.
pub async fn update_equipment_hours(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateHoursRequest>,
) -> ApiResult<Json<HoursUpdatedResponse>> {
    let usage_hours = request.validate()?;
    let equipment = state.repo.update_usage_hours(id, usage_hours).await?;

    Ok(Json(HoursUpdatedResponse {
        message: "Hours updated".to_string(),
        equipment: equipment.into(),
    }))
}
