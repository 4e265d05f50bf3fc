//! purse-core: domain types, currency formatting and date helpers for Purse

pub mod currency;
pub mod error;
pub mod finance;
pub mod notice;
pub mod plans;
pub mod summary;
pub mod time;

pub use currency::Currency;
pub use error::BudgetError;
pub use finance::{ExpenseCategory, NewTransaction, Transaction, TransactionType};
pub use notice::{Notice, NoticeKind};
pub use plans::{CategoryBudget, RecurringExpense, RecurringIncome, SavingsGoal};
pub use summary::{BudgetProgress, CategorySpend, MonthlySummary, YearlySummary};
pub use time::{MONTH_ABBREVIATIONS, parse_date, today_in, validate_month, validate_year};
