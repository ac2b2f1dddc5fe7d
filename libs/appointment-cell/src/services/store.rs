// libs/appointment-cell/src/services/store.rs
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Appointment, NewAppointment};

/// Durable collection of appointment records.
///
/// Implementations assign `id`, `created_at` and `updated_at` on insert and
/// guarantee atomicity per record only.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError>;

    /// All records, most recently created first.
    async fn find_all_newest_first(&self) -> Result<Vec<Appointment>, StoreError>;

    /// Records whose `doctor_id` equals `doctor_id`, in store-native order.
    async fn find_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, StoreError>;

    /// Removes the record if present. Returns whether anything was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Process-local store kept in insertion order.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    records: RwLock<Vec<Appointment>>,
    closed: AtomicBool,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        self.ensure_open()?;

        let now = Utc::now();
        let record = Appointment {
            id: Uuid::new_v4(),
            doctor_id: appointment.doctor_id,
            doctor_name: appointment.doctor_name,
            patient_name: appointment.patient_name,
            patient_email: appointment.patient_email,
            phone: appointment.phone,
            datetime: appointment.datetime,
            status: appointment.status,
            created_at: now,
            updated_at: now,
        };

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_all_newest_first(&self) -> Result<Vec<Appointment>, StoreError> {
        self.ensure_open()?;

        // Reverse first so that equal timestamps keep newest-insert-first after the stable sort.
        let mut records: Vec<Appointment> = self.records.read().await.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn find_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, StoreError> {
        self.ensure_open()?;

        Ok(self.records.read().await
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.ensure_open()?;

        let mut records = self.records.write().await;
        match records.iter().position(|a| a.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn close(&self) -> Result<(), StoreError> {
        debug!("Closing in-memory appointment store");
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
