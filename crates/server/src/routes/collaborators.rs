use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use service::collaborator::CollaboratorInput;
use service::PageQuery;
use tracing::info;

use crate::errors::{respond, JsonApiError};
use crate::routes::ListResponse;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/collaborator", tag = "collaborator",
    params(crate::openapi::ListParams),
    responses(
        (status = 200, description = "Page of collaborators with their services"),
        (status = 404, description = "No collaborators", body = crate::openapi::ErrorBody),
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
    Ok(respond(state.collaborators.list(query).await.map(ListResponse::from)))
}

#[utoipa::path(
    get, path = "/api/collaborator/{id}", tag = "collaborator",
    params(("id" = i32, Path, description = "Collaborator id")),
    responses(
        (status = 200, description = "Collaborator with its services"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.collaborators.get(id).await))
}

#[utoipa::path(
    post, path = "/api/collaborator", tag = "collaborator",
    request_body = crate::openapi::CollaboratorInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 409, description = "Email or registration already used", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CollaboratorInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    info!(email = %input.email, registration = %input.registration, "collaborator_create_request");
    Ok(respond(state.collaborators.create(input).await))
}

#[utoipa::path(
    put, path = "/api/collaborator/{id}", tag = "collaborator",
    params(("id" = i32, Path, description = "Collaborator id")),
    request_body = crate::openapi::CollaboratorInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
        (status = 409, description = "Email or registration already used", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CollaboratorInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(respond(state.collaborators.update(id, input).await))
}

#[utoipa::path(
    delete, path = "/api/collaborator/{id}", tag = "collaborator",
    params(("id" = i32, Path, description = "Collaborator id")),
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
    info!(id, "collaborator_delete_request");
    Ok(respond(state.collaborators.delete(id).await))
}
