//! Domain errors shared by every Purse crate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::finance::ExpenseCategory;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BudgetError {
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(Decimal),

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("no budget set for {0}")]
    NoBudget(ExpenseCategory),

    #[error("more than one budget for {0}")]
    DuplicateBudget(ExpenseCategory),

    #[error("{kind} id {id} appears more than once")]
    DuplicateId { kind: &'static str, id: String },

    #[error("date range starts {start} which is after its end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("year {0} is out of range")]
    InvalidYear(i32),

    #[error("month {0} is out of range (expected 1-12)")]
    InvalidMonth(u32),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(String),
}

/// Accept only strictly positive amounts.
pub fn ensure_positive(amount: Decimal) -> Result<Decimal, BudgetError> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(BudgetError::InvalidAmount(amount))
    }
}

/// Trim a required text field, rejecting blanks.
pub fn ensure_text(field: &'static str, value: &str) -> Result<String, BudgetError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(BudgetError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive(dec!(12.5)), Ok(dec!(12.5)));
        assert_eq!(
            ensure_positive(Decimal::ZERO),
            Err(BudgetError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            ensure_positive(dec!(-3)),
            Err(BudgetError::InvalidAmount(dec!(-3)))
        );
        assert!(ensure_positive(dec!(0.01)).is_ok());
    }

    #[test]
    fn test_ensure_text_trims() {
        assert_eq!(ensure_text("description", "  Rent  ").unwrap(), "Rent");
        assert_eq!(
            ensure_text("description", "   "),
            Err(BudgetError::MissingField("description"))
        );
    }
}
