//! Sample data endpoint.

use axum::{extract::State, http::StatusCode, Json};

use super::ApiResult;
use crate::models::MessageResponse;
use crate::AppState;

/// POST /api/seed - Insert the sample fleet into an empty database.
pub async fn seed_data(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.repo.seed_sample_data().await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Sample equipment and maintenance inserted",
        )),
    ))
}
