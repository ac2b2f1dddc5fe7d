use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::{AppConfig, StoreBackend};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub appointments_table: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            appointments_table: "appointments".to_string(),
        }
    }
}

impl TestConfig {
    /// Config pointing the Supabase store at a mock server.
    pub fn with_supabase_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_backend: StoreBackend::Supabase,
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            appointments_table: self.appointments_table.clone(),
            ..AppConfig::default()
        }
    }
}

/// A complete booking form payload as the front end sends it.
pub fn sample_request(doctor_id: &str, patient_name: &str) -> Value {
    json!({
        "doctorId": doctor_id,
        "doctorName": format!("Dr. {}", doctor_id),
        "patientName": patient_name,
        "patientEmail": format!("{}@example.com", patient_name.to_lowercase()),
        "phone": "5551234567",
        "datetime": "2025-01-01T10:00:00Z"
    })
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    /// A row of the `appointments` table as PostgREST returns it.
    pub fn appointment_row(doctor_id: &str, patient_name: &str, created_at: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "doctor_id": doctor_id,
            "doctor_name": format!("Dr. {}", doctor_id),
            "patient_name": patient_name,
            "patient_email": format!("{}@example.com", patient_name.to_lowercase()),
            "phone": "5551234567",
            "datetime": "2025-01-01T10:00:00+00:00",
            "status": "Pending",
            "created_at": created_at,
            "updated_at": created_at
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code,
            "details": null,
            "hint": null
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.supabase_url, "http://localhost:54321");
        assert_eq!(app_config.supabase_anon_key, "test-anon-key");
        assert_eq!(app_config.store_backend, StoreBackend::Supabase);
        assert!(app_config.is_configured());
    }

    #[test]
    fn test_sample_request_has_all_required_fields() {
        let body = sample_request("1", "Bob");
        for field in ["doctorId", "doctorName", "patientName", "patientEmail", "phone", "datetime"] {
            assert!(body[field].as_str().is_some_and(|v| !v.is_empty()), "{} missing", field);
        }
        assert!(body.get("status").is_none());
    }
}
