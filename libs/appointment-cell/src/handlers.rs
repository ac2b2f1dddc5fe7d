// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::extractor::JsonBody;

use crate::models::{Appointment, CreateAppointmentRequest, DELETED_MESSAGE};
use crate::services::booking::AppointmentBookingService;

#[axum::debug_handler]
pub async fn create_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    JsonBody(request): JsonBody<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = service.create_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(service): State<Arc<AppointmentBookingService>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = service.list_appointments().await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = service.list_doctor_appointments(&doctor_id).await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    service.delete_appointment(&appointment_id).await?;

    Ok(Json(json!({
        "message": DELETED_MESSAGE
    })))
}
