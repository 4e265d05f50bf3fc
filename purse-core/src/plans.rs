//! Standing plans: recurring incomes/expenses, savings goals and category budgets

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::finance::ExpenseCategory;

/// Income that lands every month (salary, rent received, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringIncome {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
}

/// Expense that is paid every month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringExpense {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
}

/// Money set aside for a destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: String,
    pub destination: String,
    pub amount: Decimal,
}

/// Monthly spending limit for one category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub category: ExpenseCategory,
    pub amount: Decimal,
}
