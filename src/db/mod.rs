// src/db/mod.rs

pub mod memory;
pub mod seed;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{Appointment, AppointmentPatch, NewAppointment, Prescription};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Corrupt row in {table}: {message}")]
    Corrupt {
        table: &'static str,
        message: String,
    },
}

/// Data access for appointments and prescriptions.
///
/// Backends are constructed through their own `init` and must be torn down
/// with [`PortalStore::close`] once the server stops.
#[async_trait]
pub trait PortalStore: Send + Sync {
    /// All appointments in insertion order.
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError>;

    /// Store a new appointment under the next identifier. Identifiers are
    /// never reused.
    async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError>;

    /// Overwrite the fields present in `patch`. `None` if `id` is unknown.
    async fn update_appointment(
        &self,
        id: i64,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, StoreError>;

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, StoreError>;

    async fn close(&self);
}

/// Pick the backend from configuration: sqlite when a database URL is set,
/// process memory otherwise.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn PortalStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Opening sqlite store at {}", url);
            Ok(Arc::new(SqliteStore::init(url).await?))
        }
        None => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::init()))
        }
    }
}
