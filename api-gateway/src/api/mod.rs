//! API handlers
//!
//! Each handler extracts the shared state and the JSON body, calls the
//! account service and maps the outcome to the status envelope.

pub mod account;
pub mod docs;
pub mod response;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
