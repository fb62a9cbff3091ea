//! HTTP behaviour that never reaches the database: routing, middleware,
//! authentication rejections, and input validation.
//!
//! These run against a pool pointed at a closed port.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{authed_get, body_json, get, post_json, token_for, unreachable_pool};
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use uuid::Uuid;
use vowly_api::auth::jwt::Claims;

// ---------------------------------------------------------------------------
// Middleware and routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let app = common::build_test_app(unreachable_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(unreachable_pool());
    let response = get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(unreachable_pool());
    let response = get(app, "/api/v1/me").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = common::build_test_app(unreachable_pool());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/events")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn organizer_preflight_rejects_unlisted_origin() {
    let app = common::build_test_app(unreachable_pool());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/events")
        .header("Origin", "https://ada-and-bo.example")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn guest_preflight_allows_any_origin() {
    let app = common::build_test_app(unreachable_pool());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/public/events/TK91513/rsvp")
        .header("Origin", "https://ada-and-bo.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = common::build_test_app(unreachable_pool());
    let note = "x".repeat(vowly_api::router::MAX_REQUEST_BODY_BYTES);
    let response = post_json(
        app,
        "/api/v1/public/events/TK91513/rsvp",
        serde_json::json!({ "full_name": "Cy", "attending": false, "note": note }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn organizer_routes_require_authorization_header() {
    for uri in ["/api/v1/me", "/api/v1/events"] {
        let app = common::build_test_app(unreachable_pool());
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(json["error"], "Missing Authorization header");
    }
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let app = common::build_test_app(unreachable_pool());
    let request = Request::builder()
        .uri("/api/v1/events")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = common::build_test_app(unreachable_pool());
    let response = authed_get(app, "/api/v1/events", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: None,
        exp: now + 600,
        iat: now,
    };
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-entirely-different"),
    )
    .unwrap();

    let app = common::build_test_app(unreachable_pool());
    let response = authed_get(app, "/api/v1/events", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Input validation ahead of the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_event_id_is_rejected() {
    let app = common::build_test_app(unreachable_pool());
    let token = token_for(Uuid::new_v4());
    let response = authed_get(app, "/api/v1/events/not-a-uuid/flow", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_event_code_is_rejected() {
    let app = common::build_test_app(unreachable_pool());
    let response = get(app, "/api/v1/public/events/nope/flow").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn rsvp_to_malformed_event_code_is_rejected() {
    let app = common::build_test_app(unreachable_pool());
    let response = post_json(
        app,
        "/api/v1/public/events/12345/rsvp",
        serde_json::json!({ "full_name": "Ada", "attending": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
