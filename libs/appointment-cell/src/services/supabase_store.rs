// libs/appointment-cell/src/services/supabase_store.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::error::StoreError;
use crate::models::{Appointment, NewAppointment};
use crate::services::store::AppointmentStore;

/// Row layout of the appointments table.
#[derive(Debug, Deserialize)]
struct AppointmentRow {
    id: Uuid,
    doctor_id: String,
    doctor_name: String,
    patient_name: String,
    patient_email: String,
    phone: String,
    datetime: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            doctor_id: row.doctor_id,
            doctor_name: row.doctor_name,
            patient_name: row.patient_name,
            patient_email: row.patient_email,
            phone: row.phone,
            datetime: row.datetime,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Appointment collection held in a Supabase (PostgREST) table.
pub struct SupabaseAppointmentStore {
    supabase: SupabaseClient,
    table_path: String,
    auth_token: String,
}

impl SupabaseAppointmentStore {
    pub fn new(config: &AppConfig) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::Configuration(
                "SUPABASE_URL and SUPABASE_ANON_PUBLIC_KEY must be set".to_string(),
            ));
        }

        info!("Using Supabase appointment store at {} (table {})",
              config.supabase_url, config.appointments_table);

        Ok(Self {
            supabase: SupabaseClient::new(config),
            table_path: format!("/rest/v1/{}", config.appointments_table),
            auth_token: config.supabase_bearer_token().to_string(),
        })
    }

    fn return_representation() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    async fn fetch(&self, method: Method, path: &str, body: Option<Value>,
                   headers: Option<HeaderMap>) -> Result<Vec<Value>, StoreError> {
        self.supabase
            .request_with_headers(method, path, Some(&self.auth_token), body, headers)
            .await
            .map_err(|e| StoreError::Request(e.to_string()))
    }

    fn decode_rows(rows: Vec<Value>) -> Result<Vec<Appointment>, StoreError> {
        rows.into_iter()
            .map(|row| {
                serde_json::from_value::<AppointmentRow>(row)
                    .map(Appointment::from)
                    .map_err(|e| StoreError::Decode(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "doctor_id": appointment.doctor_id,
            "doctor_name": appointment.doctor_name,
            "patient_name": appointment.patient_name,
            "patient_email": appointment.patient_email,
            "phone": appointment.phone,
            "datetime": appointment.datetime.to_rfc3339(),
            "status": appointment.status,
            "created_at": now,
            "updated_at": now
        });

        let rows = self.fetch(
            Method::POST,
            &self.table_path,
            Some(row),
            Some(Self::return_representation()),
        ).await?;

        Self::decode_rows(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    async fn find_all_newest_first(&self) -> Result<Vec<Appointment>, StoreError> {
        let path = format!("{}?select=*&order=created_at.desc", self.table_path);
        debug!("Fetching all appointments");

        let rows = self.fetch(Method::GET, &path, None, None).await?;
        Self::decode_rows(rows)
    }

    async fn find_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, StoreError> {
        let path = format!("{}?select=*&doctor_id=eq.{}",
                           self.table_path, urlencoding::encode(doctor_id));
        debug!("Fetching appointments for doctor {}", doctor_id);

        let rows = self.fetch(Method::GET, &path, None, None).await?;
        Self::decode_rows(rows)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let path = format!("{}?id=eq.{}", self.table_path, id);

        let rows = self.fetch(
            Method::DELETE,
            &path,
            None,
            Some(Self::return_representation()),
        ).await?;

        Ok(!rows.is_empty())
    }
}
