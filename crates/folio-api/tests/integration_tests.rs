//! # Integration Tests for folio-api
//!
//! Drives the assembled router with `tower::ServiceExt::oneshot` against the
//! in-memory store. Mail relay behaviour is checked against wiremock.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use folio_api::config::MailConfig;
use folio_api::notify::MailRelay;
use folio_api::store::MemoryStore;
use folio_api::AppState;
use folio_core::ProjectListing;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project(title: &str) -> ProjectListing {
    ProjectListing {
        title: title.to_string(),
        description: format!("{title} description"),
        technologies: vec!["Rust".into(), "React".into()],
        github: Some(format!("https://github.com/Miren3865/{title}")),
        live: None,
    }
}

fn test_app(store: Arc<MemoryStore>) -> axum::Router {
    folio_api::app(AppState::new(store))
}

fn contact_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn mail_relay(server: &MockServer) -> MailRelay {
    MailRelay::new(&MailConfig {
        api_url: format!("{}/send", server.uri()).parse().unwrap(),
        api_token: zeroize::Zeroizing::new("mail-token".into()),
        address: "owner@example.com".into(),
        timeout_secs: 5,
    })
    .unwrap()
}

/// Wait for the detached notification task to reach the mock server.
async fn wait_for_requests(server: &MockServer, count: usize) -> bool {
    for _ in 0..50 {
        if server.received_requests().await.unwrap_or_default().len() >= count {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app(Arc::new(MemoryStore::new()))
        .oneshot(get("/health/liveness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_reflects_store_health() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(store.clone());

    let response = app.clone().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    store.set_available(false);
    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// -- Listing Service ----------------------------------------------------------

#[tokio::test]
async fn test_list_projects_returns_store_order() {
    let store = Arc::new(MemoryStore::with_projects(vec![project("zeta"), project("alpha")]));
    let response = test_app(store).oneshot(get("/api/projects")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["zeta", "alpha"]);
    assert_eq!(body[0]["technologies"], serde_json::json!(["Rust", "React"]));
    assert_eq!(body[0]["github"], "https://github.com/Miren3865/zeta");
    assert!(body[0].get("live").is_none());
}

#[tokio::test]
async fn test_list_projects_empty_store() {
    let response = test_app(Arc::new(MemoryStore::new()))
        .oneshot(get("/api/projects"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_projects_store_down_returns_500() {
    let store = Arc::new(MemoryStore::with_projects(vec![project("alpha")]));
    store.set_available(false);
    let response = test_app(store).oneshot(get("/api/projects")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Failed to fetch projects" })
    );
}

// -- Submission Service -------------------------------------------------------

#[tokio::test]
async fn test_contact_persists_and_returns_id() {
    let store = Arc::new(MemoryStore::new());
    let response = test_app(store.clone())
        .oneshot(contact_request(serde_json::json!({
            "name": "A",
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Message sent and saved successfully");

    let contacts = store.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "A");
    assert_eq!(contacts[0].email, "a@x.com");
    assert_eq!(body["id"], contacts[0].id.to_string());
}

#[tokio::test]
async fn test_contact_accepts_malformed_email() {
    let store = Arc::new(MemoryStore::new());
    let response = test_app(store.clone())
        .oneshot(contact_request(serde_json::json!({
            "name": "A",
            "email": "definitely not an email",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.contacts().len(), 1);
}

#[tokio::test]
async fn test_contact_empty_name_returns_400_without_record() {
    let store = Arc::new(MemoryStore::new());
    let response = test_app(store.clone())
        .oneshot(contact_request(serde_json::json!({
            "name": "",
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "All fields are required" })
    );
    assert!(store.contacts().is_empty());
}

#[tokio::test]
async fn test_contact_missing_field_returns_400() {
    let store = Arc::new(MemoryStore::new());
    let response = test_app(store.clone())
        .oneshot(contact_request(serde_json::json!({
            "name": "A",
            "email": "a@x.com"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.contacts().is_empty());
}

#[tokio::test]
async fn test_contact_malformed_json_returns_400_error_body() {
    let response = test_app(Arc::new(MemoryStore::new()))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "All fields are required" })
    );
}

#[tokio::test]
async fn test_contact_null_field_returns_fields_required() {
    let store = Arc::new(MemoryStore::new());
    let response = test_app(store.clone())
        .oneshot(contact_request(serde_json::json!({
            "name": null,
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "All fields are required" })
    );
    assert!(store.contacts().is_empty());
}

#[tokio::test]
async fn test_contact_wrong_field_type_hides_decoder_detail() {
    let response = test_app(Arc::new(MemoryStore::new()))
        .oneshot(contact_request(serde_json::json!({
            "name": 42,
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "All fields are required" })
    );
}

#[tokio::test]
async fn test_contact_whitespace_only_name_is_stored() {
    let store = Arc::new(MemoryStore::new());
    let response = test_app(store.clone())
        .oneshot(contact_request(serde_json::json!({
            "name": "   ",
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let contacts = store.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "   ");
}

#[tokio::test]
async fn test_contact_store_down_returns_500() {
    let store = Arc::new(MemoryStore::new());
    store.set_available(false);
    let response = test_app(store)
        .oneshot(contact_request(serde_json::json!({
            "name": "A",
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Failed to process message" })
    );
}

#[tokio::test]
async fn test_contact_notifies_owner_by_email() {
    let mail = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mail)
        .await;

    let store = Arc::new(MemoryStore::new());
    let app = folio_api::app(AppState::new(store).with_mail(mail_relay(&mail)));
    let response = app
        .oneshot(contact_request(serde_json::json!({
            "name": "Ada",
            "email": "ada@x.com",
            "message": "hello"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(wait_for_requests(&mail, 1).await, "mail API never called");
    let requests = mail.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["subject"], "New Contact Form Submission from Ada");
    assert_eq!(sent["to"], "owner@example.com");
}

#[tokio::test]
async fn test_contact_relay_failure_still_succeeds() {
    let mail = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mail)
        .await;

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone()).with_mail(mail_relay(&mail));
    let metrics = state.metrics.clone();
    let response = folio_api::app(state)
        .oneshot(contact_request(serde_json::json!({
            "name": "A",
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.contacts().len(), 1);

    assert!(wait_for_requests(&mail, 1).await);
    for _ in 0..50 {
        if metrics.notifications_failed() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(metrics.notifications_failed(), 1);
}

// -- Metrics & OpenAPI --------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_requests_and_errors() {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    let app = folio_api::app(state);

    app.clone()
        .oneshot(contact_request(serde_json::json!({
            "name": "A",
            "email": "a@x.com",
            "message": "hi"
        })))
        .await
        .unwrap();
    app.clone()
        .oneshot(contact_request(serde_json::json!({ "name": "" })))
        .await
        .unwrap();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    let body = body_json(response).await;
    // The /metrics request itself is counted after its body is produced.
    assert_eq!(body["requests"], 2);
    assert_eq!(body["errors"], 1);
    assert_eq!(body["submissions_saved"], 1);
}

#[tokio::test]
async fn test_openapi_json_served() {
    let response = test_app(Arc::new(MemoryStore::new()))
        .oneshot(get("/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/contact"]["post"].is_object());
    assert!(body["paths"]["/api/projects"]["get"].is_object());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let response = test_app(Arc::new(MemoryStore::new()))
        .oneshot(
            Request::builder()
                .uri("/api/projects")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
