//! Account models and related types

use serde::{Deserialize, Serialize};

use crate::decimal::Amount;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Username of the reserved account collecting transaction fees
pub const BANK_ACCOUNT: &str = "BANK";

/// Fee charged on every deposit and transfer, credited to [`BANK_ACCOUNT`]
pub const TRANSACTION_FEE: Amount = Amount::ONE;

/// Stored account document, one per user
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique, immutable username
    pub username: String,
    /// PHC-encoded salted password hash; never returned to clients
    pub password_hash: String,
    /// Available cash
    pub balance: Amount,
    /// Amount owed; not floored at zero
    pub debt: Amount,
}

impl Account {
    /// Create a new account with zero balance and debt
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            balance: Amount::ZERO,
            debt: Amount::ZERO,
        }
    }

    /// Client-facing view without the password hash
    pub fn view(&self) -> AccountView {
        AccountView {
            username: self.username.clone(),
            balance: self.balance,
            debt: self.debt,
        }
    }
}

/// Account document as returned by `/balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct AccountView {
    /// Username
    pub username: String,
    /// Available cash
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub balance: Amount,
    /// Outstanding debt
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub debt: Amount,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            balance: account.balance,
            debt: account.debt,
        }
    }
}

/// Fields to overwrite on an existing account; `None` leaves a field untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccountUpdate {
    /// New balance
    pub balance: Option<Amount>,
    /// New debt
    pub debt: Option<Amount>,
}

impl AccountUpdate {
    /// Overwrite only the balance
    pub fn balance(balance: Amount) -> Self {
        Self {
            balance: Some(balance),
            debt: None,
        }
    }

    /// Overwrite only the debt
    pub fn debt(debt: Amount) -> Self {
        Self {
            balance: None,
            debt: Some(debt),
        }
    }

    /// Apply the update to an account in place
    pub fn apply(&self, account: &mut Account) {
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
        if let Some(debt) = self.debt {
            account.debt = debt;
        }
    }
}
