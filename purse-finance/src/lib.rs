//! purse-finance: budget store, aggregation, filtering, category rules and CSV import/export

pub mod aggregate;
pub mod category_rules;
pub mod csv_io;
pub mod filter;
pub mod store;

pub use aggregate::{budget_progress, category_breakdown, monthly_summaries, yearly_summary};
pub use category_rules::CategoryRules;
pub use csv_io::{CsvImport, SkippedRow, export_transactions_csv, parse_transactions_csv};
pub use filter::{DateRange, TransactionFilter};
pub use store::BudgetStore;
