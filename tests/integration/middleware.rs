use crate::common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use flare_admin::infrastructure::config::HttpSettings;
use flare_admin::infrastructure::mock::MockAuthProvider;
use flare_admin::infrastructure::store::memory::InMemoryDocumentStore;
use tower::ServiceExt;

#[tokio::test]
async fn test_cors_preflight() {
    let store = InMemoryDocumentStore::new();
    let state = common::create_test_app_state(&store, &MockAuthProvider::default()).await;
    let http = HttpSettings {
        cors_allowed_origins: "https://dispatch.flare.test".to_string(),
        rate_limit_per_minute: 60,
    };
    let app = flare_admin::presentation::router::app(state, &http).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/v1/admin/drivers")
                .header("Origin", "https://dispatch.flare.test")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://dispatch.flare.test"
    );
}

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let store = InMemoryDocumentStore::new();
    common::seed_admin(&store, common::ADMIN_EMAIL).await;
    let state = common::create_test_app_state(&store, &MockAuthProvider::default()).await;
    let http = HttpSettings {
        cors_allowed_origins: String::new(),
        rate_limit_per_minute: 2,
    };
    let app = flare_admin::presentation::router::app(state, &http).unwrap();
    let token = common::generate_test_token(common::ADMIN_EMAIL);

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(common::get("/api/v1/admin/stations", &token))
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert_eq!(statuses[0], StatusCode::OK);
    assert_eq!(statuses[2], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let store = InMemoryDocumentStore::new();
    let state = common::create_test_app_state(&store, &MockAuthProvider::default()).await;
    let http = HttpSettings {
        cors_allowed_origins: String::new(),
        rate_limit_per_minute: 1,
    };
    let app = flare_admin::presentation::router::app(state, &http).unwrap();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_openapi_document_served() {
    let store = InMemoryDocumentStore::new();
    let state = common::create_test_app_state(&store, &MockAuthProvider::default()).await;
    let app = common::create_test_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert!(body["paths"]["/api/v1/admin/drivers"]["post"].is_object());
}
