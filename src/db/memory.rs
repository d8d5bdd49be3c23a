use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{seed, PortalStore, StoreError};
use crate::models::{Appointment, AppointmentPatch, NewAppointment, Prescription};

struct Appointments {
    records: Vec<Appointment>,
    next_id: i64,
}

/// Process-lifetime store. Everything is lost on shutdown.
pub struct MemoryStore {
    appointments: Mutex<Appointments>,
    prescriptions: Vec<Prescription>,
}

impl MemoryStore {
    pub fn init() -> Self {
        Self::with_records(seed::appointments(), seed::prescriptions())
    }

    pub fn with_records(appointments: Vec<Appointment>, prescriptions: Vec<Prescription>) -> Self {
        let next_id = appointments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        MemoryStore {
            appointments: Mutex::new(Appointments {
                records: appointments,
                next_id,
            }),
            prescriptions,
        }
    }
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.appointments.lock().await.records.clone())
    }

    async fn create_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let mut guard = self.appointments.lock().await;
        let id = guard.next_id;
        guard.next_id += 1;

        let appointment = new.into_appointment(id);
        guard.records.push(appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        id: i64,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut guard = self.appointments.lock().await;
        match guard.records.iter_mut().find(|a| a.id == id) {
            Some(appointment) => {
                patch.apply(appointment);
                Ok(Some(appointment.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, StoreError> {
        Ok(self.prescriptions.clone())
    }

    async fn close(&self) {
        tracing::debug!("Memory store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use std::sync::Arc;

    #[tokio::test]
    async fn fresh_store_lists_seed_appointments_in_order() {
        let store = MemoryStore::init();
        let listed = store.list_appointments().await.unwrap();
        assert_eq!(listed, seed::appointments());
    }

    #[tokio::test]
    async fn create_assigns_length_plus_one() {
        let store = MemoryStore::init();
        for _ in 0..3 {
            let before = store.list_appointments().await.unwrap().len() as i64;
            let created = store
                .create_appointment(NewAppointment::default())
                .await
                .unwrap();
            assert_eq!(created.id, before + 1);
            assert_eq!(created.status, AppointmentStatus::Upcoming);
        }

        let ids: Vec<i64> = store
            .list_appointments()
            .await
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_sequential_ids() {
        let store = Arc::new(MemoryStore::init());
        let tasks: Vec<_> = (0..100)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create_appointment(NewAppointment::default())
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (3..103).collect::<Vec<i64>>());

        let listed = store.list_appointments().await.unwrap();
        assert_eq!(listed.len(), 102);
    }

    #[tokio::test]
    async fn create_keeps_malformed_fields() {
        let store = MemoryStore::init();
        let created = store
            .create_appointment(NewAppointment {
                date: Some("not-a-date".into()),
                time: Some("25:99".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.date, "not-a-date");
        assert_eq!(created.time, "25:99");
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = MemoryStore::init();
        let updated = store
            .update_appointment(42, AppointmentPatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let store = MemoryStore::init();
        let updated = store
            .update_appointment(
                2,
                AppointmentPatch {
                    date: Some("2025-08-01".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(updated.date, "2025-08-01");
        assert_eq!(updated.doctor, "Dr. Michael Chen");
        assert_eq!(store.list_appointments().await.unwrap()[1], updated);
    }

    #[tokio::test]
    async fn prescriptions_are_seeded() {
        let store = MemoryStore::init();
        assert_eq!(store.list_prescriptions().await.unwrap(), seed::prescriptions());
    }
}
