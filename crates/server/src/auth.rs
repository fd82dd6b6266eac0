use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, warn};

use service::user::Claims;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Routes reachable without a token even when the API is protected.
fn is_public(method: &Method, path: &str) -> bool {
    *method == Method::OPTIONS
        || !path.starts_with("/api/")
        || (*method == Method::POST && (path == "/api/user" || path == "/api/user/auth"))
}

/// Bearer guard for `/api` routes, active when `auth.protect_api` is set.
/// A missing token is 400; a malformed, invalid or expired one is 401.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    if !state.auth.protect_api || is_public(req.method(), req.uri().path()) {
        return next.run(req).await;
    }
    let path = req.uri().path().to_string();

    let Some(authz) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        warn!(%path, "missing Authorization header");
        return JsonApiError::bad_request("missing bearer token").into_response();
    };
    let Some(token) = authz.strip_prefix("Bearer ") else {
        warn!(%path, "invalid Authorization format (expect Bearer)");
        return JsonApiError::new(StatusCode::UNAUTHORIZED, "invalid token").into_response();
    };

    let key = DecodingKey::from_secret(state.auth.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => {
            debug!(%path, uid = data.claims.uid, "token accepted");
            req.extensions_mut().insert(data.claims);
            next.run(req).await
        }
        Err(e) => {
            warn!(%path, err = %e, "token validation failed");
            JsonApiError::new(StatusCode::UNAUTHORIZED, "invalid token").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_login_and_health_are_public() {
        assert!(is_public(&Method::POST, "/api/user"));
        assert!(is_public(&Method::POST, "/api/user/auth"));
        assert!(is_public(&Method::GET, "/health/live"));
        assert!(is_public(&Method::OPTIONS, "/api/vehicle"));
        assert!(!is_public(&Method::GET, "/api/user"));
        assert!(!is_public(&Method::GET, "/api/vehicle"));
    }
}
