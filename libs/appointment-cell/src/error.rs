use thiserror::Error;

use shared_models::error::AppError;

/// Failures raised by an [`AppointmentStore`](crate::services::store::AppointmentStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Request(String),

    #[error("Failed to decode stored appointment: {0}")]
    Decode(String),

    #[error("Store is not configured: {0}")]
    Configuration(String),

    #[error("Store has been closed")]
    Closed,
}

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("All fields are required (missing: {})", .missing.join(", "))]
    MissingFields { missing: Vec<&'static str> },

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl AppointmentError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppointmentError::MissingFields { .. } | AppointmentError::InvalidDatetime(_))
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        if err.is_validation() {
            AppError::ValidationError(err.to_string())
        } else {
            AppError::Database(err.to_string())
        }
    }
}
