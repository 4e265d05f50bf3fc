//! Transaction list filters: description search, category and inclusive date range.

use chrono::NaiveDate;
use purse_core::{BudgetError, ExpenseCategory, Transaction, TransactionType};

/// Inclusive date range; either bound may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, BudgetError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(BudgetError::InvalidDateRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description; empty matches everything
    pub search: String,
    pub category: Option<ExpenseCategory>,
    pub date_range: DateRange,
}

impl TransactionFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category.is_some() || !self.date_range.is_open()
    }

    /// All criteria must hold. A category filter excludes uncategorized and income rows.
    pub fn matches(&self, txn: &Transaction) -> bool {
        let search_ok = self.search.is_empty()
            || txn
                .description
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let category_ok = self.category.is_none_or(|c| txn.category == Some(c));
        search_ok && category_ok && self.date_range.contains(txn.date)
    }

    /// Transactions of one kind in `year` that pass the filter, newest first.
    pub fn select<'a>(
        &self,
        transactions: &'a [Transaction],
        year: i32,
        kind: TransactionType,
    ) -> Vec<&'a Transaction> {
        let mut out: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.kind == kind && t.in_year(year) && self.matches(t))
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}
