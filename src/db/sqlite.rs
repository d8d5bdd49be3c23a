use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

use super::{seed, PortalStore, StoreError};
use crate::models::{Appointment, AppointmentPatch, NewAppointment, Prescription};

const CREATE_APPOINTMENTS: &str = "CREATE TABLE IF NOT EXISTS appointments (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    doctor TEXT NOT NULL,
    date   TEXT NOT NULL,
    time   TEXT NOT NULL,
    \"type\" TEXT NOT NULL,
    status TEXT NOT NULL,
    reason TEXT NOT NULL
)";

const CREATE_PRESCRIPTIONS: &str = "CREATE TABLE IF NOT EXISTS prescriptions (
    id           INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    dosage       TEXT NOT NULL,
    frequency    TEXT NOT NULL,
    start_date   TEXT NOT NULL,
    end_date     TEXT NOT NULL,
    doctor       TEXT NOT NULL,
    instructions TEXT NOT NULL,
    refills_left INTEGER NOT NULL CHECK (refills_left >= 0)
)";

const SELECT_APPOINTMENTS: &str =
    "SELECT id, doctor, date, time, \"type\", status, reason FROM appointments";

/// Embedded durable store. Use `sqlite::memory:` for a throwaway database or
/// `sqlite://path/to/portal.db` for one that survives restarts.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn init(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // A single long-lived connection keeps `sqlite::memory:` alive and
        // serializes writers.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = SqliteStore { pool };
        store.migrate().await?;
        store.seed_if_empty().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_APPOINTMENTS).execute(&self.pool).await?;
        sqlx::query(CREATE_PRESCRIPTIONS).execute(&self.pool).await?;
        Ok(())
    }

    async fn seed_if_empty(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let appointments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&mut *tx)
            .await?;
        if appointments == 0 {
            for appt in seed::appointments() {
                sqlx::query(
                    "INSERT INTO appointments (id, doctor, date, time, \"type\", status, reason)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(appt.id)
                .bind(&appt.doctor)
                .bind(&appt.date)
                .bind(&appt.time)
                .bind(appt.kind.as_str())
                .bind(appt.status.as_str())
                .bind(&appt.reason)
                .execute(&mut *tx)
                .await?;
            }
            tracing::info!("Seeded sample appointments");
        }

        let prescriptions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prescriptions")
            .fetch_one(&mut *tx)
            .await?;
        if prescriptions == 0 {
            for p in seed::prescriptions() {
                sqlx::query(
                    "INSERT INTO prescriptions
                     (id, name, dosage, frequency, start_date, end_date, doctor, instructions, refills_left)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(p.id)
                .bind(&p.name)
                .bind(&p.dosage)
                .bind(&p.frequency)
                .bind(&p.start_date)
                .bind(&p.end_date)
                .bind(&p.doctor)
                .bind(&p.instructions)
                .bind(i64::from(p.refills_left))
                .execute(&mut *tx)
                .await?;
            }
            tracing::info!("Seeded sample prescriptions");
        }

        tx.commit().await?;
        Ok(())
    }
}

fn appointment_from_row(row: &SqliteRow) -> Result<Appointment, StoreError> {
    let corrupt = |e: crate::models::UnknownVariant| StoreError::Corrupt {
        table: "appointments",
        message: e.to_string(),
    };

    let kind: String = row.try_get("type")?;
    let status: String = row.try_get("status")?;
    Ok(Appointment {
        id: row.try_get("id")?,
        doctor: row.try_get("doctor")?,
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        kind: kind.parse().map_err(corrupt)?,
        status: status.parse().map_err(corrupt)?,
        reason: row.try_get("reason")?,
    })
}

fn prescription_from_row(row: &SqliteRow) -> Result<Prescription, StoreError> {
    let refills: i64 = row.try_get("refills_left")?;
    let refills_left = u32::try_from(refills).map_err(|_| StoreError::Corrupt {
        table: "prescriptions",
        message: format!("refills_left out of range: {}", refills),
    })?;

    Ok(Prescription {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        dosage: row.try_get("dosage")?,
        frequency: row.try_get("frequency")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        doctor: row.try_get("doctor")?,
        instructions: row.try_get("instructions")?,
        refills_left,
    })
}

#[async_trait]
impl PortalStore for SqliteStore {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_APPOINTMENTS))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(appointment_from_row).collect()
    }

    async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let mut appointment = new.into_appointment(0);

        let result = sqlx::query(
            "INSERT INTO appointments (doctor, date, time, \"type\", status, reason)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&appointment.doctor)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(appointment.kind.as_str())
        .bind(appointment.status.as_str())
        .bind(&appointment.reason)
        .execute(&self.pool)
        .await?;

        appointment.id = result.last_insert_rowid();
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        id: i64,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_APPOINTMENTS))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut appointment = appointment_from_row(&row)?;
        patch.apply(&mut appointment);

        sqlx::query(
            "UPDATE appointments
             SET doctor = ?, date = ?, time = ?, \"type\" = ?, status = ?, reason = ?
             WHERE id = ?",
        )
        .bind(&appointment.doctor)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(appointment.kind.as_str())
        .bind(appointment.status.as_str())
        .bind(&appointment.reason)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(appointment))
    }

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, dosage, frequency, start_date, end_date, doctor, instructions, refills_left
             FROM prescriptions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(prescription_from_row).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Sqlite store closed");
    }
}
