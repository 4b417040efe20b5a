use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = OK, description = "Service is running", body = HealthStatus),
    ))]
pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: String::from("success"),
        message: String::from("Service is running"),
    })
}
