//! OpenAPI document for the ledger endpoints

use axum::{http::header, response::IntoResponse};
use utoipa::OpenApi;

use crate::api::account;
use crate::error::ApiError;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        account::register,
        account::add,
        account::transfer,
        account::balance,
        account::take_loan,
        account::pay_loan,
    ),
    components(
        schemas(
            account::RegisterRequest,
            account::AmountRequest,
            account::TransferRequest,
            account::BalanceRequest,
            common::model::status::Envelope,
            common::model::account::AccountView,
        )
    ),
    tags(
        (name = "account", description = "Registration, deposits, transfers and loans")
    ),
    info(
        title = "Bank API",
        version = "1.0.0",
        description = "Minimal banking ledger. Outcomes are reported as a status code inside the response body."
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Result<impl IntoResponse, ApiError> {
    let body = ApiDoc::openapi()
        .to_json()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI document: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
