//! Aggregated views produced from the raw records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::finance::ExpenseCategory;

/// Totals for one calendar month of the selected year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    /// Three-letter month name ("Jan" ... "Dec")
    pub month: String,
    /// 0-based month index
    pub month_index: usize,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Totals for the whole selected year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct YearlySummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_balance: Decimal,
    /// Sum of savings goals; reported alongside the balance, not subtracted from it
    pub total_savings: Decimal,
}

/// One bucket of the spending breakdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: ExpenseCategory,
    pub amount: Decimal,
}

/// Spending against a category budget for one month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    pub category: ExpenseCategory,
    pub limit: Decimal,
    pub spent: Decimal,
}

impl BudgetProgress {
    /// Negative when the budget is exceeded.
    pub fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }

    /// Fraction of the limit already spent (1.0 = exactly on budget).
    pub fn utilization(&self) -> Decimal {
        if self.limit > Decimal::ZERO {
            self.spent / self.limit
        } else {
            Decimal::ZERO
        }
    }
}
