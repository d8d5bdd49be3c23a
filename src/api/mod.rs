// src/api/mod.rs

pub mod handler;

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::AppState;
use crate::services::{
    list_appointments_handler, list_prescriptions_handler, set_appointment_handler,
    update_appointment_handler,
};

pub use handler::health_handler;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/appointments",
            get(list_appointments_handler).post(set_appointment_handler),
        )
        .route("/api/appointments/{id}", patch(update_appointment_handler))
        .route("/api/prescriptions", get(list_prescriptions_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed, MemoryStore};
    use crate::models::{Appointment, AppointmentStatus, Prescription};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Arc::new(MemoryStore::init())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn lists_seed_appointments_in_order() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/appointments", None).await;
        assert_eq!(status, StatusCode::OK);

        let appointments: Vec<Appointment> = serde_json::from_slice(&body).unwrap();
        assert_eq!(appointments, seed::appointments());
    }

    #[tokio::test]
    async fn lists_prescriptions_with_camel_case_fields() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/prescriptions", None).await;
        assert_eq!(status, StatusCode::OK);

        let raw: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(raw[0]["startDate"], "1/1/2024");
        assert_eq!(raw[1]["refillsLeft"], 5);

        let prescriptions: Vec<Prescription> = serde_json::from_slice(&body).unwrap();
        assert_eq!(prescriptions, seed::prescriptions());
    }

    #[tokio::test]
    async fn post_creates_with_default_status() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/appointments",
            Some(json!({
                "doctor": "Dr. Manu",
                "date": "2031-03-04",
                "time": "08:45",
                "type": "In-Person",
                "reason": "Rash"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let created: Appointment = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(created.status, AppointmentStatus::Upcoming);

        let (_, body) = send(&app, Method::GET, "/api/appointments", None).await;
        let appointments: Vec<Appointment> = serde_json::from_slice(&body).unwrap();
        assert_eq!(appointments.len(), 3);
        assert_eq!(appointments[2], created);
    }

    #[tokio::test]
    async fn post_honours_explicit_status() {
        let app = app();
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/appointments",
            Some(json!({ "status": "Completed" })),
        )
        .await;
        let created: Appointment = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.status, AppointmentStatus::Completed);
    }

    #[tokio::test]
    async fn patch_reschedules_existing_appointment() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/appointments/1",
            Some(json!({ "date": "2025-09-01", "time": "16:30" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let updated: Appointment = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.date, "2025-09-01");
        assert_eq!(updated.time, "16:30");
        assert_eq!(updated.doctor, "Dr. Sarah Johnson");
    }

    #[tokio::test]
    async fn patch_unknown_id_is_not_found() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/appointments/77",
            Some(json!({ "time": "09:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["status"], "error");
    }

    #[tokio::test]
    async fn unknown_status_value_is_rejected() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/appointments",
            Some(json!({ "status": "Cancelled" })),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_without_storing() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/appointments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"doctor\": \"Dr. Smith\""))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());

        let (_, body) = send(&app, Method::GET, "/api/appointments", None).await;
        let appointments: Vec<Appointment> = serde_json::from_slice(&body).unwrap();
        assert_eq!(appointments.len(), 2);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "status": "ok" }));
    }
}
