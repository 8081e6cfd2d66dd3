//! Account API handlers
//!
//! Handles the six ledger endpoints. Every request carries the full
//! username/password pair; there are no sessions.
//! - Register
//! - Add (deposit) and Transfer
//! - Balance
//! - Take and pay loans

use std::sync::Arc;

use axum::{extract::State, Json};
use common::decimal::{parse_amount, Amount};
#[allow(unused_imports)] // referenced by the OpenAPI annotations
use common::model::{account::AccountView, status::Envelope};
use common::model::status::{
    MSG_AMOUNT_ADDED, MSG_LOAN_ADDED, MSG_PAYMENT_PROCESSED, MSG_REGISTERED, MSG_TRANSFERRED,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::api::response::{success, AccountResponse, EnvelopeResponse};
use crate::error::ApiError;
use crate::AppState;

/// Register request
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Envelope with status 200, or 301 if the username is taken", body = Envelope),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<EnvelopeResponse, ApiError> {
    state.account_service.register(&request.username, &request.password).await?;
    Ok(success(MSG_REGISTERED))
}

/// Read an amount from a JSON number; strings and other types are rejected
fn json_number<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;

    if let Some(n) = number.as_i64() {
        return Ok(Amount::from(n));
    }
    if let Some(n) = number.as_u64() {
        return Ok(Amount::from(n));
    }

    let float = number
        .as_f64()
        .ok_or_else(|| D::Error::custom(format!("unsupported amount: {}", number)))?;
    parse_amount(&float.to_string()).map_err(D::Error::custom)
}

/// Request carrying credentials and an amount
#[derive(Deserialize, ToSchema)]
pub struct AmountRequest {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Amount; a JSON number, numeric strings are rejected
    #[schema(value_type = f64)]
    #[serde(deserialize_with = "json_number")]
    pub amount: Amount,
}

/// Deposit money; one unit goes to the bank as a fee
#[utoipa::path(
    post,
    path = "/add",
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Envelope with status 200, 301, 302 or 304", body = Envelope),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AmountRequest>,
) -> Result<EnvelopeResponse, ApiError> {
    state
        .account_service
        .add(&request.username, &request.password, request.amount)
        .await?;
    Ok(success(MSG_AMOUNT_ADDED))
}

/// Transfer request
#[derive(Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Sender username
    pub username: String,
    /// Sender password
    pub password: String,
    /// Receiving username
    pub destination: String,
    /// Amount debited from the sender
    #[schema(value_type = f64)]
    #[serde(deserialize_with = "json_number")]
    pub amount: Amount,
}

/// Transfer money to another account
#[utoipa::path(
    post,
    path = "/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Envelope with status 200, 301, 302 or 304", body = Envelope),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TransferRequest>,
) -> Result<EnvelopeResponse, ApiError> {
    state
        .account_service
        .transfer(&request.username, &request.password, &request.destination, request.amount)
        .await?;
    Ok(success(MSG_TRANSFERRED))
}

/// Balance request
#[derive(Deserialize, ToSchema)]
pub struct BalanceRequest {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

/// Read the caller's account document
#[utoipa::path(
    post,
    path = "/balance",
    request_body = BalanceRequest,
    responses(
        (status = 200, description = "Account document, or an envelope with status 301 or 302", body = AccountView),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn balance(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BalanceRequest>,
) -> Result<AccountResponse, ApiError> {
    let view = state
        .account_service
        .balance(&request.username, &request.password)
        .await?;
    Ok(Json(view))
}

/// Take a loan
#[utoipa::path(
    post,
    path = "/loan",
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Envelope with status 200, 301 or 302", body = Envelope),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn take_loan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AmountRequest>,
) -> Result<EnvelopeResponse, ApiError> {
    state
        .account_service
        .take_loan(&request.username, &request.password, request.amount)
        .await?;
    Ok(success(MSG_LOAN_ADDED))
}

/// Repay part of a loan
#[utoipa::path(
    post,
    path = "/pay",
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Envelope with status 200, 301, 302 or 303", body = Envelope),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn pay_loan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AmountRequest>,
) -> Result<EnvelopeResponse, ApiError> {
    state
        .account_service
        .pay_loan(&request.username, &request.password, request.amount)
        .await?;
    Ok(success(MSG_PAYMENT_PROCESSED))
}
