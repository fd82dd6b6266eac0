use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

fn test_config(rate_limited: bool, protect_api: bool) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig::in_memory();
    cfg.auth.jwt_secret = SECRET.into();
    cfg.auth.protect_api = protect_api;
    cfg.rate_limit.enabled = rate_limited;
    cfg
}

async fn build_app(cfg: AppConfig) -> anyhow::Result<Router> {
    Ok(server::build_app(&cfg).await?)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req.header(header::CONTENT_TYPE, "application/json").body(Body::from(b.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

fn vehicle(plate: &str) -> Value {
    json!({"plate": plate, "chassis": "9BWZZZ377VT004251", "model": "MOTTU_SPORT", "status": "DISPONIVEL"})
}

#[tokio::test]
async fn vehicle_crud_and_list_shape() -> anyhow::Result<()> {
    let app = build_app(test_config(false, false)).await?;

    let (status, body) = send(&app, "GET", "/api/vehicle", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no content for vehicle");

    let (status, created) = send(&app, "POST", "/api/vehicle", Some(vehicle("ABC1D23")), None).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["model"], "MOTTU_SPORT");

    send(&app, "POST", "/api/vehicle", Some(vehicle("XYZ9K87")), None).await;

    let (status, page) = send(&app, "GET", "/api/vehicle?offset=0&limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["paging"], json!({"offset": 0, "limit": 1, "total": 2}));
    assert_eq!(page["data"][0]["services"], json!([]));

    let mut changed = vehicle("ABC1D23");
    changed["status"] = json!("MANUTENCAO");
    let (status, updated) = send(&app, "PUT", &format!("/api/vehicle/{id}"), Some(changed), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "MANUTENCAO");

    let (status, body) = send(&app, "DELETE", &format!("/api/vehicle/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", &format!("/api/vehicle/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "vehicle not found");
    Ok(())
}

#[tokio::test]
async fn invalid_vehicle_and_malformed_json_are_400() -> anyhow::Result<()> {
    let app = build_app(test_config(false, false)).await?;

    let (status, body) = send(&app, "POST", "/api/vehicle", Some(vehicle("SHORT")), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("plate"));

    let (status, _) = send(&app, "POST", "/api/vehicle", Some(json!({"plate": "ABC1D23"})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn bad_window_or_id_is_json_400() -> anyhow::Result<()> {
    let app = build_app(test_config(false, false)).await?;
    for code in ["BP-01", "BP-02", "BP-03"] {
        let part = json!({"name": "Brake pad", "code": code, "description": "front", "stock": 2});
        assert_eq!(send(&app, "POST", "/api/part", Some(part), None).await.0, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/api/part?offset=18446744073709551615&limit=10", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, page) = send(&app, "GET", "/api/part?offset=0&limit=9223372036854775807", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["paging"]["total"], 3);

    let (status, body) = send(&app, "GET", "/api/part?offset=-1", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "GET", "/api/vehicle/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn services_by_vehicle_404_204_and_200() -> anyhow::Result<()> {
    let app = build_app(test_config(false, false)).await?;

    let (status, _) = send(&app, "GET", "/api/service/vehicle/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, v) = send(&app, "POST", "/api/vehicle", Some(vehicle("ABC1D23")), None).await;
    let vid = v["id"].as_i64().unwrap();
    let (status, body) = send(&app, "GET", &format!("/api/service/vehicle/{vid}"), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, c) = send(
        &app,
        "POST",
        "/api/collaborator",
        Some(json!({"name": "Ana", "registration": "RM1001", "email": "ana@mottu.com"})),
        None,
    )
    .await;
    let cid = c["id"].as_i64().unwrap();

    let (status, svc) = send(
        &app,
        "POST",
        "/api/service",
        Some(json!({"description": "oil change", "vehicle_id": vid, "collaborator_id": cid})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(svc["status"], "Pendente");

    let (status, list) = send(&app, "GET", &format!("/api/service/vehicle/{vid}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["collaborator"]["email"], "ana@mottu.com");

    let (status, _) = send(
        &app,
        "POST",
        "/api/service",
        Some(json!({"description": "brakes", "vehicle_id": 4242, "collaborator_id": cid})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn duplicate_collaborator_is_409() -> anyhow::Result<()> {
    let app = build_app(test_config(false, false)).await?;
    let body = json!({"name": "Bruno", "registration": "RM2002", "email": "bruno@mottu.com"});

    let (status, _) = send(&app, "POST", "/api/collaborator", Some(body.clone()), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, err) = send(&app, "POST", "/api/collaborator", Some(body), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn register_login_and_reject_bad_password() -> anyhow::Result<()> {
    let app = build_app(test_config(false, false)).await?;
    let (status, user) = send(
        &app,
        "POST",
        "/api/user",
        Some(json!({"name": "Carla", "email": "carla@mottu.com", "password": "s3cret-pass"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(user.get("password_hash").is_none());

    let (status, session) = send(
        &app,
        "POST",
        "/api/user/auth",
        Some(json!({"email": "carla@mottu.com", "password": "s3cret-pass"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!session["token"].as_str().unwrap().is_empty());
    assert_eq!(session["user"]["email"], "carla@mottu.com");

    let (status, _) = send(
        &app,
        "POST",
        "/api/user/auth",
        Some(json!({"email": "carla@mottu.com", "password": "wrong-pass"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn sixth_list_call_in_window_is_429() -> anyhow::Result<()> {
    let app = build_app(test_config(true, false)).await?;
    for _ in 0..5 {
        let (status, _) = send(&app, "GET", "/api/part", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    // window is shared across list endpoints
    let (status, body) = send(&app, "GET", "/api/vehicle", None, None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/api/part/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn protected_api_requires_bearer_token() -> anyhow::Result<()> {
    let app = build_app(test_config(false, true)).await?;

    let (status, _) = send(&app, "GET", "/api/part", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "GET", "/api/part", None, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/user",
        Some(json!({"name": "Davi", "email": "davi@mottu.com", "password": "long-enough"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, session) = send(
        &app,
        "POST",
        "/api/user/auth",
        Some(json!({"email": "davi@mottu.com", "password": "long-enough"})),
        None,
    )
    .await;
    let token = session["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "GET", "/api/part", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/health/live", None, None).await;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn readiness_pings_database() -> anyhow::Result<()> {
    let app = build_app(test_config(false, false)).await?;
    let (status, body) = send(&app, "GET", "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Healthy");
    Ok(())
}
