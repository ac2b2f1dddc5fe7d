// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, delete},
};

use crate::handlers;
use crate::services::booking::AppointmentBookingService;

/// Appointment routes, meant to be nested under `/api/appointments`.
pub fn appointment_routes(service: Arc<AppointmentBookingService>) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment).get(handlers::list_appointments))
        .route("/doctor/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .with_state(service)
}
