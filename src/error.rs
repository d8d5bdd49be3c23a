use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Appointment {0} not found")]
    AppointmentNotFound(i64),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::AppointmentNotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
