use axum::{extract::State, http::StatusCode, Json};
use common::types::{Health, HealthCheck};
use tracing::error;

use crate::state::ServerState;

#[utoipa::path(get, path = "/health/live", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn live() -> Json<Health> {
    Json(Health::healthy())
}

/// Ready once the database answers a ping.
#[utoipa::path(
    get, path = "/health/ready", tag = "health",
    responses(
        (status = 200, description = "Ready", body = crate::openapi::HealthResponse),
        (status = 503, description = "Database unreachable", body = crate::openapi::HealthResponse)
    )
)]
pub async fn ready(State(state): State<ServerState>) -> (StatusCode, Json<Health>) {
    let check = match models::db::test_connection(&state.db).await {
        Ok(()) => HealthCheck::healthy("database"),
        Err(e) => {
            error!(error = %e, "database ping failed");
            HealthCheck::unhealthy("database", e.to_string())
        }
    };
    let health = Health::from_checks(vec![check]);
    let status = if health.is_healthy() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status, Json(health))
}
