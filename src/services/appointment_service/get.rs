use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::{AppState, Appointment};

pub async fn list_appointments_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointments = state.store.list_appointments().await?;
    Ok(Json(appointments))
}
