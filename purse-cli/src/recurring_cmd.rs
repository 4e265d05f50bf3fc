use anyhow::{Context, Result};
use clap::Subcommand;
use purse_core::ExpenseCategory;
use purse_finance::BudgetStore;
use rust_decimal::Decimal;

#[derive(Subcommand, Debug)]
pub enum RecurringCommand {
    /// Income received every month
    Income {
        #[command(subcommand)]
        command: RecurringIncomeCommand,
    },

    /// Expenses paid every month
    Expense {
        #[command(subcommand)]
        command: RecurringExpenseCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecurringIncomeCommand {
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: Decimal,
    },
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<Decimal>,
    },
    Remove { id: String },
    List,
}

#[derive(Subcommand, Debug)]
pub enum RecurringExpenseCommand {
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        category: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
    },
    Remove { id: String },
    List,
}

/// Returns true when the store changed.
pub fn run(command: RecurringCommand, store: &mut BudgetStore) -> Result<bool> {
    match command {
        RecurringCommand::Income { command } => run_income(command, store),
        RecurringCommand::Expense { command } => run_expense(command, store),
    }
}

fn run_income(command: RecurringIncomeCommand, store: &mut BudgetStore) -> Result<bool> {
    match command {
        RecurringIncomeCommand::Add { description, amount } => {
            let item = store.add_recurring_income(&description, amount)?;
            println!("{}", item.id);
            Ok(true)
        }
        RecurringIncomeCommand::Edit { id, description, amount } => {
            let mut item = store
                .recurring_income(&id)
                .cloned()
                .with_context(|| format!("no recurring income with id {id}"))?;
            if let Some(d) = description {
                item.description = d;
            }
            if let Some(a) = amount {
                item.amount = a;
            }
            store.update_recurring_income(item)?;
            Ok(true)
        }
        RecurringIncomeCommand::Remove { id } => {
            store.delete_recurring_income(&id)?;
            Ok(true)
        }
        RecurringIncomeCommand::List => {
            let items = store.recurring_incomes();
            if items.is_empty() {
                println!("(no recurring incomes)");
            }
            for r in items {
                println!("{:>16}  {}  [{}]", store.format_currency(r.amount), r.description, r.id);
            }
            Ok(false)
        }
    }
}

fn run_expense(command: RecurringExpenseCommand, store: &mut BudgetStore) -> Result<bool> {
    match command {
        RecurringExpenseCommand::Add { description, amount, category } => {
            let category: ExpenseCategory = category.parse()?;
            let item = store.add_recurring_expense(&description, amount, category)?;
            println!("{}", item.id);
            Ok(true)
        }
        RecurringExpenseCommand::Edit { id, description, amount, category } => {
            let mut item = store
                .recurring_expense(&id)
                .cloned()
                .with_context(|| format!("no recurring expense with id {id}"))?;
            if let Some(d) = description {
                item.description = d;
            }
            if let Some(a) = amount {
                item.amount = a;
            }
            if let Some(c) = category {
                item.category = c.parse()?;
            }
            store.update_recurring_expense(item)?;
            Ok(true)
        }
        RecurringExpenseCommand::Remove { id } => {
            store.delete_recurring_expense(&id)?;
            Ok(true)
        }
        RecurringExpenseCommand::List => {
            let items = store.recurring_expenses();
            if items.is_empty() {
                println!("(no recurring expenses)");
            }
            for r in items {
                println!(
                    "{:>16}  {:<13}  {}  [{}]",
                    store.format_currency(r.amount),
                    r.category.label(),
                    r.description,
                    r.id
                );
            }
            Ok(false)
        }
    }
}
