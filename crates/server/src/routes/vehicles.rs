use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use service::vehicle::VehicleInput;
use service::PageQuery;
use tracing::info;

use crate::errors::{respond, JsonApiError};
use crate::routes::ListResponse;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/vehicle", tag = "vehicle",
    params(crate::openapi::ListParams),
    responses(
        (status = 200, description = "Page of vehicles with their services"),
        (status = 404, description = "No vehicles", body = crate::openapi::ErrorBody),
        (status = 429, description = "Rate limited", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Response, JsonApiError> {
    if !state.limiter.check_rate_limit().await {
        return Err(JsonApiError::too_many_requests());
    }
    let Query(query) = query?;
    Ok(respond(state.vehicles.list(query).await.map(ListResponse::from)))
}

#[utoipa::path(
    get, path = "/api/vehicle/{id}", tag = "vehicle",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle with its services"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.vehicles.get(id).await))
}

#[utoipa::path(
    post, path = "/api/vehicle", tag = "vehicle",
    request_body = crate::openapi::VehicleInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<VehicleInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    info!(plate = %input.plate, model = ?input.model, "vehicle_create_request");
    Ok(respond(state.vehicles.create(input).await))
}

#[utoipa::path(
    put, path = "/api/vehicle/{id}", tag = "vehicle",
    params(("id" = i32, Path, description = "Vehicle id")),
    request_body = crate::openapi::VehicleInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<VehicleInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(respond(state.vehicles.update(id, input).await))
}

#[utoipa::path(
    delete, path = "/api/vehicle/{id}", tag = "vehicle",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Deleted, together with its services"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    info!(id, "vehicle_delete_request");
    Ok(respond(state.vehicles.delete(id).await))
}
