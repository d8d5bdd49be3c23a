use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::ApiError;
use crate::models::{AppState, Appointment, AppointmentPatch};

/// Reschedule: overwrite whatever fields the client sent.
pub async fn update_appointment_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<Json<Appointment>, ApiError> {
    match state.store.update_appointment(id, patch).await? {
        Some(appointment) => {
            tracing::info!(id, "Rescheduled appointment");
            Ok(Json(appointment))
        }
        None => Err(ApiError::AppointmentNotFound(id)),
    }
}
