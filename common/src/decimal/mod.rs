//! Decimal type utilities for exact money arithmetic

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

use crate::error::{Error, Result};

/// Money amount (balances, debts, deposits, transfers)
pub type Amount = Decimal;

/// Parse an amount persisted as decimal text
pub fn parse_amount(raw: &str) -> std::result::Result<Amount, rust_decimal::Error> {
    raw.trim().parse::<Amount>()
}

/// `a + b`, or `DecimalError` when the result leaves the decimal range
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_add(b)
        .ok_or_else(|| Error::DecimalError(format!("amount overflow: {} + {}", a, b)))
}

/// `a - b`, or `DecimalError` when the result leaves the decimal range
pub fn checked_sub(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_sub(b)
        .ok_or_else(|| Error::DecimalError(format!("amount overflow: {} - {}", a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_text() {
        assert_eq!(parse_amount("42").unwrap(), dec!(42));
        assert_eq!(parse_amount(" -3.50 ").unwrap(), dec!(-3.5));
        assert!(parse_amount("forty").is_err());
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(checked_add(dec!(1.5), dec!(2)).unwrap(), dec!(3.5));
        assert_eq!(checked_sub(dec!(1), dec!(3)).unwrap(), dec!(-2));

        assert!(matches!(checked_add(Amount::MAX, Amount::ONE), Err(Error::DecimalError(_))));
        assert!(matches!(checked_sub(Amount::MIN, Amount::ONE), Err(Error::DecimalError(_))));
    }
}
