//! Response helpers
//!
//! Successful operations reply with the flat `{"status", "message"}` envelope;
//! `/balance` replies with the bare account document.

use axum::Json;
use common::model::account::AccountView;
use common::model::status::Envelope;

/// Envelope reply
pub type EnvelopeResponse = Json<Envelope>;

/// Account document reply
pub type AccountResponse = Json<AccountView>;

/// Success envelope with an operation-specific message
pub fn success(message: &str) -> EnvelopeResponse {
    Json(Envelope::success(message))
}
