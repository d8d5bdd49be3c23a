use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::models::{AppState, Appointment, NewAppointment};

pub async fn set_appointment_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appointment = state.store.create_appointment(payload).await?;
    tracing::info!(id = appointment.id, "Created appointment");
    Ok((StatusCode::CREATED, Json(appointment)))
}
