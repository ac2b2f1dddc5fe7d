// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use shared_config::{AppConfig, StoreBackend};

use crate::error::{AppointmentError, StoreError};
use crate::models::{Appointment, CreateAppointmentRequest};
use crate::services::store::{AppointmentStore, InMemoryAppointmentStore};
use crate::services::supabase_store::SupabaseAppointmentStore;

/// Create/list/delete operations over the appointment collection.
///
/// Holds no state of its own besides the store handle; every call is
/// independent of every other.
#[derive(Clone)]
pub struct AppointmentBookingService {
    store: Arc<dyn AppointmentStore>,
}

impl AppointmentBookingService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Opens the store selected by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn AppointmentStore> = match config.store_backend {
            StoreBackend::Supabase => Arc::new(SupabaseAppointmentStore::new(config)?),
            StoreBackend::Memory => {
                warn!("Using in-memory appointment store; records are lost on shutdown");
                Arc::new(InMemoryAppointmentStore::new())
            }
        };

        Ok(Self::new(store))
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let new_appointment = request.validate()?;

        debug!("Booking appointment with doctor {} at {}",
               new_appointment.doctor_id, new_appointment.datetime);

        let appointment = self.store.insert(new_appointment).await
            .map_err(|e| {
                error!("Failed to persist appointment: {}", e);
                e
            })?;

        info!("Appointment {} created for doctor {} with status {}",
              appointment.id, appointment.doctor_id, appointment.status);

        Ok(appointment)
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let appointments = self.store.find_all_newest_first().await?;
        debug!("Listed {} appointments", appointments.len());
        Ok(appointments)
    }

    /// Exact match on doctor id; an empty id matches nothing.
    pub async fn list_doctor_appointments(
        &self,
        doctor_id: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        if doctor_id.is_empty() {
            return Ok(Vec::new());
        }

        let appointments = self.store.find_by_doctor(doctor_id).await?;
        debug!("Found {} appointments for doctor {}", appointments.len(), doctor_id);
        Ok(appointments)
    }

    /// Deletes by id. Unknown or malformed ids are a no-op.
    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        let id = match Uuid::parse_str(appointment_id) {
            Ok(id) => id,
            Err(_) => {
                warn!("Ignoring delete for malformed appointment id '{}'", appointment_id);
                return Ok(());
            }
        };

        if self.store.delete_by_id(id).await? {
            info!("Appointment {} deleted", id);
        } else {
            debug!("Appointment {} not found, nothing to delete", id);
        }

        Ok(())
    }

    pub async fn close(&self) -> Result<(), AppointmentError> {
        self.store.close().await?;
        Ok(())
    }
}
