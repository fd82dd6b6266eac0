use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use service::user::{LoginInput, UserInput};
use service::PageQuery;
use tracing::info;

use crate::errors::{respond, JsonApiError};
use crate::routes::ListResponse;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/user", tag = "user",
    params(crate::openapi::ListParams),
    responses(
        (status = 200, description = "Page of users"),
        (status = 404, description = "No users", body = crate::openapi::ErrorBody),
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
    Ok(respond(state.users.list(query).await.map(ListResponse::from)))
}

#[utoipa::path(
    get, path = "/api/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "User"), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody))
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.users.get(id).await))
}

#[utoipa::path(
    post, path = "/api/user", tag = "user",
    request_body = crate::openapi::UserInputDoc,
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    info!(email = %input.email, "user_register_request");
    Ok(respond(state.users.create(input).await))
}

#[utoipa::path(
    put, path = "/api/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::UserInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(respond(state.users.update(id, input).await))
}

#[utoipa::path(
    delete, path = "/api/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found", body = crate::openapi::ErrorBody))
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, JsonApiError> {
    let Path(id) = id?;
    Ok(respond(state.users.delete(id).await))
}

#[utoipa::path(
    post, path = "/api/user/auth", tag = "user",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In: user and bearer token"),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    Ok(respond(state.users.authenticate(input).await))
}
