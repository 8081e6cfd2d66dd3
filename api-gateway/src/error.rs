//! Error handling for the API gateway
//!
//! Domain rejections are answered with HTTP 200 and the status envelope in the
//! body. Only infrastructure failures change the transport status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::model::status::Envelope;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body returned for server-side failures
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always 500
    pub status: u16,
    /// Human-readable error message
    pub message: String,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Common(#[from] common::error::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Common(e) = &self {
            if let Some(status) = e.domain_status() {
                tracing::debug!("Rejected with {}: {}", status.code(), e);
                return (StatusCode::OK, Json(Envelope::from(status))).into_response();
            }
        }

        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();
        tracing::error!("API Error [{}]: {:?}", request_id, &self);

        let error_response = ErrorResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: self.to_string(),
            request_id: Some(request_id),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error;

    #[test]
    fn test_rejection_is_transport_success() {
        let response = ApiError::from(Error::IncorrectPassword("alice".into())).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_infrastructure_error_is_500() {
        let response = ApiError::from(Error::AccountNotFound("BANK".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
