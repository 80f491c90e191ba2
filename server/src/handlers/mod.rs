use axum::response::Response;
use serde::Serialize;

use crate::models::event::Venue;
use crate::utils::response::success;

pub mod approvals;
pub mod auth;
pub mod clubs;
pub mod dashboard;
pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "campus-events-api",
    };

    success(payload, "Health check successful")
}

pub async fn list_locations() -> Response {
    success(Venue::ALL, "Locations retrieved")
}
