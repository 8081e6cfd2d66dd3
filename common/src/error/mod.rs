//! Error types for the bank API
//!
//! This module provides the single error type shared by the account service
//! and the HTTP gateway. Two families live side by side:
//!
//! - domain rejections (unknown user, wrong password, bad amount, ...) which
//!   are reported to clients as a status code carried in the response body
//! - infrastructure failures (database, hashing, configuration) which are
//!   surfaced as transport-level server errors
//!
//! [`Error::domain_status`] tells the two apart.

use std::fmt::Display;
use thiserror::Error;

use crate::model::status::DomainStatus;

/// Bank API error type
#[derive(Debug, Error)]
pub enum Error {
    /// Registration attempted with a username that already exists
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Credential gate: no account with this username
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Credential gate: the password did not verify
    #[error("Incorrect password for user: {0}")]
    IncorrectPassword(String),

    /// Transfer destination does not exist
    #[error("Unknown destination account: {0}")]
    UnknownDestination(String),

    /// Loan repayment larger than the available balance
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Deposit amount is zero or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transfer attempted from an account with no positive balance
    #[error("No funds to transfer: {0}")]
    NoFundsToTransfer(String),

    /// An account the operation relies on is missing from the store
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Password hashing or hash parsing failed
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Decimal conversion error
    #[error("Decimal conversion error: {0}")]
    DecimalError(String),
}

impl Error {
    /// Body-level status for domain rejections, `None` for infrastructure failures
    pub fn domain_status(&self) -> Option<DomainStatus> {
        match self {
            Error::UsernameTaken(_) | Error::UnknownUser(_) => Some(DomainStatus::InvalidUsername),
            Error::IncorrectPassword(_) => Some(DomainStatus::IncorrectPassword),
            Error::UnknownDestination(_) => Some(DomainStatus::InvalidDestination),
            Error::InsufficientFunds(_) => Some(DomainStatus::NotEnoughMoney),
            Error::InvalidAmount(_) => Some(DomainStatus::InvalidAmount),
            Error::NoFundsToTransfer(_) => Some(DomainStatus::NoFundsToTransfer),
            Error::AccountNotFound(_)
            | Error::PasswordHash(_)
            | Error::ConfigurationError(_)
            | Error::Internal(_)
            | Error::Database(_)
            | Error::Migration(_)
            | Error::DecimalError(_) => None,
        }
    }

    /// Whether this error is a domain rejection rather than a server failure
    pub fn is_rejection(&self) -> bool {
        self.domain_status().is_some()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::AccountNotFound(msg) => Error::AccountNotFound(format!("{}: {}", context, msg)),
                Error::PasswordHash(msg) => Error::PasswordHash(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::DecimalError(msg) => Error::DecimalError(format!("{}: {}", context, msg)),
                // Rejections carry the username verbatim; leave them alone
                other => other,
            }
        })
    }
}
