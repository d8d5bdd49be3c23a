use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::{AppState, Prescription};

pub async fn list_prescriptions_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    Ok(Json(state.store.list_prescriptions().await?))
}
