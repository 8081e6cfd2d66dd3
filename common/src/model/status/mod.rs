//! Body-level status codes and the response envelope
//!
//! Every endpoint except `/balance` answers with `{"status", "message"}`. The
//! status is an application code, not the HTTP status of the response.

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Success code shared by every operation
pub const STATUS_OK: u16 = 200;

/// Success message for `/register`
pub const MSG_REGISTERED: &str = "You successfully signed up for the API";
/// Success message for `/add`
pub const MSG_AMOUNT_ADDED: &str = "Amount added successfully to account";
/// Success message for `/transfer`
pub const MSG_TRANSFERRED: &str = "Successful transaction";
/// Success message for `/loan`
pub const MSG_LOAN_ADDED: &str = "Loan added succesfully";
/// Success message for `/pay`
pub const MSG_PAYMENT_PROCESSED: &str = "Payment processed";

/// Rejection outcomes and their body codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    /// 301, unknown or duplicate username
    InvalidUsername,
    /// 301, unknown transfer destination
    InvalidDestination,
    /// 302
    IncorrectPassword,
    /// 303
    NotEnoughMoney,
    /// 304, non-positive deposit
    InvalidAmount,
    /// 304, transfer from an empty account
    NoFundsToTransfer,
}

impl DomainStatus {
    /// Numeric body code
    pub fn code(self) -> u16 {
        match self {
            DomainStatus::InvalidUsername | DomainStatus::InvalidDestination => 301,
            DomainStatus::IncorrectPassword => 302,
            DomainStatus::NotEnoughMoney => 303,
            DomainStatus::InvalidAmount | DomainStatus::NoFundsToTransfer => 304,
        }
    }

    /// Client-facing message
    pub fn message(self) -> &'static str {
        match self {
            DomainStatus::InvalidUsername => "Invalid Username",
            DomainStatus::InvalidDestination => "Invalid destination account",
            DomainStatus::IncorrectPassword => "Incorrect Password",
            DomainStatus::NotEnoughMoney => "Not enough money in account",
            DomainStatus::InvalidAmount => "The money amount entered must be greater than zero",
            DomainStatus::NoFundsToTransfer => "Not enough money in account, please add more money",
        }
    }
}

/// Response envelope `{"status": <int>, "message": <string>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Envelope {
    /// Body-level status code
    pub status: u16,
    /// Human-readable outcome
    pub message: String,
}

impl Envelope {
    /// Build an envelope from a code and message
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Successful outcome with an operation-specific message
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(STATUS_OK, message)
    }
}

impl From<DomainStatus> for Envelope {
    fn from(status: DomainStatus) -> Self {
        Self::new(status.code(), status.message())
    }
}
