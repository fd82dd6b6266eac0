use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::Page;

use crate::{auth, openapi::ApiDoc, state::ServerState};

pub mod collaborators;
pub mod health;
pub mod parts;
pub mod services;
pub mod users;
pub mod vehicles;

#[derive(Debug, Serialize)]
pub struct Paging {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
}

/// List payload: `{ data, paging: { offset, limit, total } }`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T> From<Page<Vec<T>>> for ListResponse<T> {
    fn from(page: Page<Vec<T>>) -> Self {
        Self { data: page.data, paging: Paging { offset: page.offset, limit: page.limit, total: page.total } }
    }
}

/// Build the full application router: health probes, `/api` CRUD routes and Swagger UI
pub fn build_router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready));

    let api = Router::new()
        .route("/api/vehicle", get(vehicles::list).post(vehicles::create))
        .route("/api/vehicle/:id", get(vehicles::get).put(vehicles::update).delete(vehicles::delete))
        .route("/api/collaborator", get(collaborators::list).post(collaborators::create))
        .route(
            "/api/collaborator/:id",
            get(collaborators::get).put(collaborators::update).delete(collaborators::delete),
        )
        .route("/api/service", get(services::list).post(services::create))
        .route("/api/service/:id", get(services::get).put(services::update).delete(services::delete))
        .route("/api/service/vehicle/:vehicle_id", get(services::list_by_vehicle))
        .route("/api/part", get(parts::list).post(parts::create))
        .route("/api/part/:id", get(parts::get).put(parts::update).delete(parts::delete))
        .route("/api/user", get(users::list).post(users::create))
        .route("/api/user/:id", get(users::get).put(users::update).delete(users::delete))
        .route("/api/user/auth", post(users::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token_state));

    public
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
