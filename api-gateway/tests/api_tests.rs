use std::sync::Arc;

use account_service::AccountService;
use api_gateway::{router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let service = AccountService::new();
    service.ensure_bank_account(Some("bank-pw")).await.unwrap();
    router(AppState::new(Arc::new(service)))
}

async fn post(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn register(app: &Router, username: &str) {
    let (_, body) = post(app, "/register", json!({"username": username, "password": "pw"})).await;
    assert_eq!(body["status"], 200);
}

async fn balance_of(app: &Router, username: &str, password: &str) -> Value {
    post(app, "/balance", json!({"username": username, "password": password})).await.1
}

#[tokio::test]
async fn test_register_and_duplicate() {
    let app = app().await;

    let (status, body) = post(&app, "/register", json!({"username": "alice", "password": "pw"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": 200, "message": "You successfully signed up for the API"}));

    let (status, body) = post(&app, "/register", json!({"username": "alice", "password": "x"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": 301, "message": "Invalid Username"}));
}

#[tokio::test]
async fn test_balance_document_shape() {
    let app = app().await;
    register(&app, "alice").await;

    let body = balance_of(&app, "alice", "pw").await;
    let fields = body.as_object().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["balance"].as_f64(), Some(0.0));
    assert_eq!(body["debt"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_credential_failures_are_body_codes() {
    let app = app().await;
    register(&app, "alice").await;

    let (status, body) = post(&app, "/balance", json!({"username": "alice", "password": "nope"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": 302, "message": "Incorrect Password"}));

    let (status, body) = post(&app, "/balance", json!({"username": "ghost", "password": "pw"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": 301, "message": "Invalid Username"}));
}

#[tokio::test]
async fn test_add_and_invalid_amounts() {
    let app = app().await;
    register(&app, "alice").await;

    for amount in [json!(0), json!(-5)] {
        let (_, body) = post(&app, "/add", json!({"username": "alice", "password": "pw", "amount": amount})).await;
        assert_eq!(
            body,
            json!({"status": 304, "message": "The money amount entered must be greater than zero"})
        );
    }

    let (_, body) = post(&app, "/add", json!({"username": "alice", "password": "pw", "amount": 10})).await;
    assert_eq!(body, json!({"status": 200, "message": "Amount added successfully to account"}));

    assert_eq!(balance_of(&app, "alice", "pw").await["balance"].as_f64(), Some(9.0));
    assert_eq!(balance_of(&app, "BANK", "bank-pw").await["balance"].as_f64(), Some(1.0));
}

#[tokio::test]
async fn test_transfer_flow() {
    let app = app().await;
    register(&app, "alice").await;
    register(&app, "bob").await;

    let (_, body) = post(
        &app,
        "/transfer",
        json!({"username": "alice", "password": "pw", "destination": "bob", "amount": 10}),
    )
    .await;
    assert_eq!(
        body,
        json!({"status": 304, "message": "Not enough money in account, please add more money"})
    );

    let (_, body) = post(
        &app,
        "/transfer",
        json!({"username": "alice", "password": "pw", "destination": "carol", "amount": 10}),
    )
    .await;
    assert_eq!(body, json!({"status": 301, "message": "Invalid destination account"}));

    post(&app, "/add", json!({"username": "alice", "password": "pw", "amount": 51})).await;
    let (_, body) = post(
        &app,
        "/transfer",
        json!({"username": "alice", "password": "pw", "destination": "bob", "amount": 10}),
    )
    .await;
    assert_eq!(body, json!({"status": 200, "message": "Successful transaction"}));

    assert_eq!(balance_of(&app, "alice", "pw").await["balance"].as_f64(), Some(40.0));
    assert_eq!(balance_of(&app, "bob", "pw").await["balance"].as_f64(), Some(9.0));
    assert_eq!(balance_of(&app, "BANK", "bank-pw").await["balance"].as_f64(), Some(2.0));
}

#[tokio::test]
async fn test_loan_and_payment() {
    let app = app().await;
    register(&app, "alice").await;

    let (_, body) = post(&app, "/loan", json!({"username": "alice", "password": "pw", "amount": 100})).await;
    assert_eq!(body, json!({"status": 200, "message": "Loan added succesfully"}));

    let (_, body) = post(&app, "/pay", json!({"username": "alice", "password": "pw", "amount": 150})).await;
    assert_eq!(body, json!({"status": 303, "message": "Not enough money in account"}));

    let (_, body) = post(&app, "/pay", json!({"username": "alice", "password": "pw", "amount": 40.5})).await;
    assert_eq!(body, json!({"status": 200, "message": "Payment processed"}));

    let body = balance_of(&app, "alice", "pw").await;
    assert_eq!(body["balance"].as_f64(), Some(59.5));
    assert_eq!(body["debt"].as_f64(), Some(59.5));
}

#[tokio::test]
async fn test_missing_bank_account_is_server_error() {
    let app = router(AppState::new(Arc::new(AccountService::new())));
    register(&app, "alice").await;

    let (status, body) = post(&app, "/add", json!({"username": "alice", "password": "pw", "amount": 10})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_malformed_body_is_rejected_without_side_effects() {
    let app = app().await;
    register(&app, "alice").await;

    let request = Request::builder()
        .method("POST")
        .uri("/add")
        .header("content-type", "application/json")
        .body(Body::from(json!({"username": "alice", "password": "pw"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    assert_eq!(balance_of(&app, "alice", "pw").await["balance"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_string_amounts_are_rejected() {
    let app = app().await;
    register(&app, "alice").await;
    register(&app, "bob").await;

    for (path, body) in [
        ("/add", json!({"username": "alice", "password": "pw", "amount": "10"})),
        ("/loan", json!({"username": "alice", "password": "pw", "amount": "10"})),
        (
            "/transfer",
            json!({"username": "alice", "password": "pw", "destination": "bob", "amount": "10"}),
        ),
    ] {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error(), "{} returned {}", path, response.status());
    }

    let view = balance_of(&app, "alice", "pw").await;
    assert_eq!(view["balance"].as_f64(), Some(0.0));
    assert_eq!(view["debt"].as_f64(), Some(0.0));
    assert_eq!(balance_of(&app, "bob", "pw").await["balance"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = app().await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    for path in ["/register", "/add", "/transfer", "/balance", "/loan", "/pay"] {
        assert!(doc["paths"].get(path).is_some(), "missing {}", path);
    }
}
