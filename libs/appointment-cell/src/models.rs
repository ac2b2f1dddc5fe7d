// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppointmentError;

pub const DEFAULT_STATUS: &str = "Pending";
pub const DELETED_MESSAGE: &str = "Appointment deleted successfully";

// ==============================================================================
// CORE APPOINTMENT MODEL
// ==============================================================================

/// A persisted booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub patient_email: String,
    pub phone: String,
    pub datetime: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Booking form payload as received over the wire. Every field is optional
/// here so that presence can be checked explicitly by [`validate`](Self::validate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: Option<String>,
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub phone: Option<String>,
    /// RFC 3339 string, naive ISO string (UTC) or epoch milliseconds.
    pub datetime: Option<Value>,
    pub status: Option<String>,
}

/// A request that passed validation and is ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub doctor_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub patient_email: String,
    pub phone: String,
    pub datetime: DateTime<Utc>,
    pub status: String,
}

impl CreateAppointmentRequest {
    pub fn validate(self) -> Result<NewAppointment, AppointmentError> {
        let mut missing = Vec::new();

        let doctor_id = required(self.doctor_id, "doctorId", &mut missing);
        let doctor_name = required(self.doctor_name, "doctorName", &mut missing);
        let patient_name = required(self.patient_name, "patientName", &mut missing);
        let patient_email = required(self.patient_email, "patientEmail", &mut missing);
        let phone = required(self.phone, "phone", &mut missing);

        let datetime = match self.datetime {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => Some(value),
        };
        if datetime.is_none() {
            missing.push("datetime");
        }

        if !missing.is_empty() {
            return Err(AppointmentError::MissingFields { missing });
        }

        let datetime = match datetime {
            Some(value) => parse_datetime_value(&value)?,
            None => return Err(AppointmentError::MissingFields { missing: vec!["datetime"] }),
        };

        let status = self.status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        Ok(NewAppointment {
            doctor_id,
            doctor_name,
            patient_name,
            patient_email,
            phone,
            datetime,
            status,
        })
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

// ==============================================================================
// DATETIME PARSING
// ==============================================================================

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_datetime_value(value: &Value) -> Result<DateTime<Utc>, AppointmentError> {
    match value {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| AppointmentError::InvalidDatetime(n.to_string())),
        other => Err(AppointmentError::InvalidDatetime(other.to_string())),
    }
}

/// Parses a point in time. Strings without an offset are taken as UTC.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, AppointmentError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppointmentError::InvalidDatetime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use serde_json::json;

    fn full_request() -> CreateAppointmentRequest {
        serde_json::from_value(json!({
            "doctorId": "1",
            "doctorName": "Dr. A",
            "patientName": "Bob",
            "patientEmail": "bob@x.com",
            "phone": "5551234567",
            "datetime": "2025-01-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request_defaults_status_to_pending() {
        let appointment = full_request().validate().unwrap();

        assert_eq!(appointment.doctor_id, "1");
        assert_eq!(appointment.status, "Pending");
        assert_eq!(appointment.datetime, Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_explicit_status_is_kept() {
        let mut request = full_request();
        request.status = Some("Confirmed".to_string());
        assert_eq!(request.validate().unwrap().status, "Confirmed");

        let mut request = full_request();
        request.status = Some(String::new());
        assert_eq!(request.validate().unwrap().status, "Pending");
    }

    #[test]
    fn test_missing_and_empty_fields_are_reported_together() {
        let mut request = full_request();
        request.doctor_name = None;
        request.phone = Some(String::new());
        request.datetime = Some(Value::Null);

        assert_matches!(
            request.validate(),
            Err(AppointmentError::MissingFields { missing }) if missing == vec!["doctorName", "phone", "datetime"]
        );
    }

    #[test]
    fn test_empty_body_reports_every_field() {
        let result = CreateAppointmentRequest::default().validate();
        assert_matches!(result, Err(AppointmentError::MissingFields { missing }) if missing.len() == 6);
    }

    #[test]
    fn test_no_format_checks_on_email_or_phone() {
        let mut request = full_request();
        request.patient_email = Some("not-an-email".to_string());
        request.phone = Some("call me".to_string());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unparsable_datetime_is_rejected() {
        let mut request = full_request();
        request.datetime = Some(json!("next tuesday"));
        assert_matches!(request.validate(), Err(AppointmentError::InvalidDatetime(_)));

        let mut request = full_request();
        request.datetime = Some(json!(true));
        assert_matches!(request.validate(), Err(AppointmentError::InvalidDatetime(_)));
    }

    #[test]
    fn test_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_datetime("2025-01-01T10:00:00Z").unwrap(), expected);
        assert_eq!(parse_datetime("2025-01-01T10:00:00.000Z").unwrap(), expected);
        assert_eq!(parse_datetime("2025-01-01T12:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_datetime("2025-01-01T10:00:00").unwrap(), expected);
        assert_eq!(parse_datetime("2025-01-01T10:00").unwrap(), expected);
        assert_eq!(parse_datetime("2025-01-01 10:00:00").unwrap(), expected);
        assert_eq!(
            parse_datetime("2025-01-01").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_datetime("2025-13-01T10:00:00Z").is_err());
    }

    #[test]
    fn test_epoch_millis_datetime() {
        let mut request = full_request();
        request.datetime = Some(json!(1_735_725_600_000i64));
        assert_eq!(
            request.validate().unwrap().datetime,
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_appointment_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let appointment = Appointment {
            id: Uuid::nil(),
            doctor_id: "1".into(),
            doctor_name: "Dr. A".into(),
            patient_name: "Bob".into(),
            patient_email: "bob@x.com".into(),
            phone: "5551234567".into(),
            datetime: now,
            status: DEFAULT_STATUS.into(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&appointment).unwrap();
        assert_eq!(value["doctorId"], "1");
        assert_eq!(value["patientEmail"], "bob@x.com");
        assert_eq!(value["createdAt"], "2025-01-01T09:00:00Z");
        assert!(value.get("doctor_id").is_none());
    }
}
