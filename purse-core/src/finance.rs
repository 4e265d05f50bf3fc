//! Transaction types: income/expense records and their spending categories

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(BudgetError::UnknownTransactionType(s.trim().to_string())),
        }
    }
}

/// Spending categories, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Utilities,
    Housing,
    Entertainment,
    Health,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Utilities,
        ExpenseCategory::Housing,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Health,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BudgetError::UnknownCategory(wanted.to_string()))
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    /// Always positive; direction comes from `kind`
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Only meaningful for expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Bucket used for spending reports. Uncategorized expenses land in `Other`.
    pub fn spend_category(&self) -> ExpenseCategory {
        self.category.unwrap_or(ExpenseCategory::Other)
    }

    pub fn in_year(&self, year: i32) -> bool {
        self.date.year() == year
    }

    /// `month` is 1-based.
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

/// A transaction that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<ExpenseCategory>,
}

impl NewTransaction {
    pub fn income(description: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            kind: TransactionType::Income,
            description: description.into(),
            amount,
            date,
            category: None,
        }
    }

    pub fn expense(
        description: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        category: Option<ExpenseCategory>,
    ) -> Self {
        Self {
            kind: TransactionType::Expense,
            description: description.into(),
            amount,
            date,
            category,
        }
    }

    /// Attach an id, producing a stored transaction.
    pub fn with_id(self, id: impl Into<String>) -> Transaction {
        Transaction {
            id: id.into(),
            kind: self.kind,
            description: self.description,
            amount: self.amount,
            date: self.date,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_helpers() {
        let txn = NewTransaction::expense("Groceries", dec!(42.5), date(2025, 3, 14), None).with_id("t-1");
        assert!(txn.is_expense());
        assert_eq!(txn.signed_amount(), dec!(-42.5));
        assert_eq!(txn.spend_category(), ExpenseCategory::Other);
        assert!(txn.in_year(2025));
        assert!(txn.in_month(2025, 3));
        assert!(!txn.in_month(2024, 3));
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("food".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Food));
        assert_eq!(" ENTERTAINMENT ".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Entertainment));
        assert_eq!(
            "Pets".parse::<ExpenseCategory>(),
            Err(BudgetError::UnknownCategory("Pets".into()))
        );
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("Income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!("EXPENSE".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let txn = NewTransaction::expense("Bus pass", dec!(30), date(2025, 1, 2), Some(ExpenseCategory::Transport))
            .with_id("t-9");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "EXPENSE");
        assert_eq!(json["category"], "Transport");
        assert_eq!(json["date"], "2025-01-02");
        assert_eq!(json["amount"], "30");

        let income = NewTransaction::income("Salary", dec!(1000), date(2025, 1, 1)).with_id("t-10");
        let json = serde_json::to_value(&income).unwrap();
        assert_eq!(json["type"], "INCOME");
        assert!(json.get("category").is_none());
    }
}
