//! Router-level tests for the identity resolver's token stage.
//!
//! These run without a live database: the pool is created lazily and the
//! guard rejects every request here before any query is issued.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use caseflow_api::config::ApiConfig;
use caseflow_api::AppState;
use caseflow_core::auth::jwt;

const SECRET: &str = "integration-test-secret";

fn test_app() -> axum::Router {
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: "postgres://localhost:5432/caseflow_test".into(),
        jwt_secret: SECRET.into(),
    };
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    caseflow_api::router(AppState { pool, config })
}

async fn get_tickets(app: axum::Router, auth_header: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().uri("/tickets");
    if let Some(value) = auth_header {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    app.oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

#[tokio::test]
async fn root_is_public() {
    let resp = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
    assert_eq!(json["message"], "Welcome to Caseflow");
}

#[tokio::test]
async fn missing_header_is_denied_with_challenge() {
    let resp = get_tickets(test_app(), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).map(|v| v.to_str().unwrap()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn non_bearer_scheme_is_denied() {
    let resp = get_tickets(test_app(), Some("Basic YWxpY2U6cHcxMjM=")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_denied() {
    let resp = get_tickets(test_app(), Some("Bearer not.a.jwt")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
    // One generic surface for every token failure.
    assert_eq!(json["error"], "unauthorized");
    assert_eq!(json["message"], "Could not validate credentials");
}

#[tokio::test]
async fn expired_token_is_denied() {
    let token = jwt::issue_token("alice", Duration::seconds(-120), SECRET.as_bytes())
        .expect("issue");
    let resp = get_tickets(test_app(), Some(&format!("Bearer {token}"))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_denied() {
    let token = jwt::issue_token("alice", Duration::minutes(5), b"some-other-secret")
        .expect("issue");
    let resp = get_tickets(test_app(), Some(&format!("Bearer {token}"))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
