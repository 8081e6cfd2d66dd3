//! HTTP gateway for the bank API

pub mod api;
pub mod error;
pub mod config;

use std::sync::Arc;

use account_service::AccountService;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::{account, docs, health_check};

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Wrap a service into shareable state
    pub fn new(account_service: Arc<AccountService>) -> Arc<Self> {
        Arc::new(Self { account_service })
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/register", post(account::register))
        .route("/add", post(account::add))
        .route("/transfer", post(account::transfer))
        .route("/balance", post(account::balance))
        .route("/loan", post(account::take_loan))
        .route("/pay", post(account::pay_loan))
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
