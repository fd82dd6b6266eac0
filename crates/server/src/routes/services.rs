//! Service record (work order) endpoints, mounted under `/api/service`.
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use service::service_record::ServiceRecordInput;
use service::PageQuery;
use tracing::info;

use crate::errors::{respond, JsonApiError};
use crate::routes::ListResponse;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/service", tag = "service",
    params(crate::openapi::ListParams),
    responses(
        (status = 200, description = "Page of services with vehicle and collaborator"),
        (status = 404, description = "No services", body = crate::openapi::ErrorBody),
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
    Ok(respond(state.services.list(query).await.map(ListResponse::from)))
}

#[utoipa::path(
    get, path = "/api/service/{id}", tag = "service",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service with vehicle and collaborator"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.services.get(id).await))
}

#[utoipa::path(
    get, path = "/api/service/vehicle/{vehicle_id}", tag = "service",
    params(("vehicle_id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Services of the vehicle, oldest first"),
        (status = 204, description = "Vehicle has no services"),
        (status = 404, description = "Vehicle not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list_by_vehicle(
    State(state): State<ServerState>,
    vehicle_id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(vehicle_id) = vehicle_id?;
    Ok(respond(state.services.list_by_vehicle(vehicle_id).await))
}

#[utoipa::path(
    post, path = "/api/service", tag = "service",
    request_body = crate::openapi::ServiceRecordInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Vehicle or collaborator missing", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ServiceRecordInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    info!(vehicle_id = input.vehicle_id, collaborator_id = input.collaborator_id, "service_create_request");
    Ok(respond(state.services.create(input).await))
}

#[utoipa::path(
    put, path = "/api/service/{id}", tag = "service",
    params(("id" = i32, Path, description = "Service id")),
    request_body = crate::openapi::ServiceRecordInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ServiceRecordInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(respond(state.services.update(id, input).await))
}

#[utoipa::path(
    delete, path = "/api/service/{id}", tag = "service",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.services.delete(id).await))
}
