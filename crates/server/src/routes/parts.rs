use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use service::part::PartInput;
use service::PageQuery;

use crate::errors::{respond, JsonApiError};
use crate::routes::ListResponse;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/part", tag = "part",
    params(crate::openapi::ListParams),
    responses(
        (status = 200, description = "Page of parts"),
        (status = 404, description = "No parts", body = crate::openapi::ErrorBody),
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
    Ok(respond(state.parts.list(query).await.map(ListResponse::from)))
}

#[utoipa::path(
    get, path = "/api/part/{id}", tag = "part",
    params(("id" = i32, Path, description = "Part id")),
    responses((status = 200, description = "Part"), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody))
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.parts.get(id).await))
}

#[utoipa::path(
    post, path = "/api/part", tag = "part",
    request_body = crate::openapi::PartInputDoc,
    responses((status = 200, description = "Created"), (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody))
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<PartInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    Ok(respond(state.parts.create(input).await))
}

#[utoipa::path(
    put, path = "/api/part/{id}", tag = "part",
    params(("id" = i32, Path, description = "Part id")),
    request_body = crate::openapi::PartInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PartInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(respond(state.parts.update(id, input).await))
}

#[utoipa::path(
    delete, path = "/api/part/{id}", tag = "part",
    params(("id" = i32, Path, description = "Part id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody))
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.parts.delete(id).await))
}
