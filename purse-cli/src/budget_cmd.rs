use anyhow::Result;
use chrono::Datelike;
use clap::Subcommand;
use purse_core::{ExpenseCategory, today_in};
use purse_finance::BudgetStore;
use rust_decimal::Decimal;

use crate::report::print_budget_progress;

#[derive(Subcommand, Debug)]
pub enum BudgetCommand {
    /// Set (or replace) the monthly limit for a category
    Set { category: String, amount: Decimal },

    /// Remove the limit for a category
    Remove { category: String },

    /// Spending against each budget for one month of the selected year
    Status {
        /// 1-12 (default: current month)
        #[arg(long)]
        month: Option<u32>,
    },
}

/// Returns true when the store changed. `timezone` is only consulted when
/// `status` has to default to the current month.
pub fn run(command: BudgetCommand, store: &mut BudgetStore, timezone: &str) -> Result<bool> {
    match command {
        BudgetCommand::Set { category, amount } => {
            let category: ExpenseCategory = category.parse()?;
            store.set_category_budget(category, amount)?;
            Ok(true)
        }
        BudgetCommand::Remove { category } => {
            let category: ExpenseCategory = category.parse()?;
            store.delete_category_budget(category)?;
            Ok(true)
        }
        BudgetCommand::Status { month } => {
            let month = match month {
                Some(m) => m,
                None => today_in(timezone)?.month(),
            };
            let progress = store.budget_progress(month)?;
            print_budget_progress(store, month, &progress);
            Ok(false)
        }
    }
}
