use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use appointment_cell::services::AppointmentBookingService;

pub const APPOINTMENTS_PREFIX: &str = "/api/appointments";

pub fn create_router(service: Arc<AppointmentBookingService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctor booking API is running!" }))
        .nest(APPOINTMENTS_PREFIX, appointment_routes(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use appointment_cell::services::InMemoryAppointmentStore;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let service = AppointmentBookingService::new(Arc::new(InMemoryAppointmentStore::new()));
        create_router(Arc::new(service))
    }

    #[tokio::test]
    async fn test_liveness_route() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Doctor booking API is running!");
    }

    #[tokio::test]
    async fn test_appointments_are_mounted_under_prefix() {
        let app = app();
        let create = Request::builder()
            .method("POST")
            .uri("/api/appointments")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "doctorId": "3",
                "doctorName": "Dr. C",
                "patientName": "Dana",
                "patientEmail": "dana@example.com",
                "phone": "5550001111",
                "datetime": "2025-03-04T15:30:00.000Z",
                "status": "Confirmed"
            }).to_string()))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let list = Request::builder()
            .uri("/api/appointments/doctor/3")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(list).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json[0]["status"], "Confirmed");
        assert_eq!(json[0]["datetime"], "2025-03-04T15:30:00Z");
    }
}
