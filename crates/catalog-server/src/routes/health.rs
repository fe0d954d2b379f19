//! Liveness probe.

use axum::http::StatusCode;

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is running"))
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
