//! Common types and utilities for the bank API
//!
//! This library contains the shared error taxonomy, the account model and the
//! database helpers used by the account service and the HTTP gateway.

pub mod error;
pub mod model;
pub mod decimal;
pub mod db;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
