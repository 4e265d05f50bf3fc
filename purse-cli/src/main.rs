use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use purse_core::{Currency, ExpenseCategory, NewTransaction, NoticeKind, parse_date, today_in};
use purse_finance::{BudgetStore, CategoryRules, export_transactions_csv, parse_transactions_csv};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

mod budget_cmd;
mod config;
mod logging;
mod recurring_cmd;
mod report;
mod savings_cmd;
mod state;

use budget_cmd::BudgetCommand;
use config::Config;
use recurring_cmd::RecurringCommand;
use savings_cmd::SavingsCommand;

#[derive(Parser, Debug)]
#[command(name = "purse", version, about = "Personal budget tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Income,
    Expense,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an income or expense
    Add {
        #[arg(value_enum)]
        kind: Kind,

        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        description: String,

        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Expense category; guessed from the description when omitted
        #[arg(long)]
        category: Option<String>,
    },

    /// Change fields of an existing transaction
    Edit {
        id: String,

        #[arg(long)]
        amount: Option<Decimal>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a transaction
    Delete { id: String },

    /// List income and expenses of the selected year
    List {
        /// Case-insensitive text to look for in descriptions
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// View another year without changing the selected one
        #[arg(long)]
        year: Option<i32>,
    },

    /// Yearly totals and the month-by-month balance
    Summary {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Summary plus spending by category
    Report {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Per-category monthly budgets
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },

    /// Recurring incomes and expenses
    Recurring {
        #[command(subcommand)]
        command: RecurringCommand,
    },

    /// Savings goals
    Savings {
        #[command(subcommand)]
        command: SavingsCommand,
    },

    /// Switch display currency (INR or USD)
    Currency { code: String },

    /// Switch the selected year
    Year { year: i32 },

    /// Import transactions from CSV (date,description,amount[,type][,category])
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Export all transactions to CSV
    Export {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Manage ~/.purse/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(&cfg.logging);

    // config commands never touch the store, so a broken timezone or budget
    // file cannot lock the user out of fixing their config
    let command = match cli.command {
        Command::Config { command } => return run_config(command, &cfg),
        command => command,
    };

    let mut store = state::load_store(&cfg)?;
    let changed = run(command, &cfg, &mut store)?;
    if changed {
        state::save_store(&store)?;
    }
    print_notices(&mut store);

    Ok(())
}

fn run(command: Command, cfg: &Config, store: &mut BudgetStore) -> Result<bool> {
    match command {
        Command::Add { kind, amount, description, date, category } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today_in(&cfg.display.timezone)?,
            };
            let new = match kind {
                Kind::Income => {
                    if category.is_some() {
                        bail!("income transactions do not take a category");
                    }
                    NewTransaction::income(description, amount, date)
                }
                Kind::Expense => {
                    let category = match category {
                        Some(c) => c.parse::<ExpenseCategory>()?,
                        None => CategoryRules::builtin()?.categorize(&description),
                    };
                    NewTransaction::expense(description, amount, date, Some(category))
                }
            };
            let txn = store.add_transaction(new)?;
            println!("{}", txn.id);
            Ok(true)
        }

        Command::Edit { id, amount, description, date, category } => {
            let mut txn = store
                .transaction(&id)
                .cloned()
                .with_context(|| format!("no transaction with id {id}"))?;
            if let Some(a) = amount {
                txn.amount = a;
            }
            if let Some(d) = description {
                txn.description = d;
            }
            if let Some(d) = date {
                txn.date = parse_date(&d)?;
            }
            if let Some(c) = category {
                txn.category = Some(c.parse()?);
            }
            store.update_transaction(txn)?;
            Ok(true)
        }

        Command::Delete { id } => {
            store.delete_transaction(&id)?;
            Ok(true)
        }

        Command::List { search, category, from, to, year } => {
            if let Some(y) = year {
                store.set_selected_year(y)?;
            }
            store.set_search_query(search.unwrap_or_default());
            store.set_category_filter(category.map(|c| c.parse::<ExpenseCategory>()).transpose()?);
            store.set_date_range(parse_opt_date(from)?, parse_opt_date(to)?)?;

            let view: &BudgetStore = store;
            report::print_transactions(view, "Income", &view.income_transactions());
            report::print_transactions(view, "Expenses", &view.expense_transactions());
            Ok(false)
        }

        Command::Summary { year } => {
            if let Some(y) = year {
                store.set_selected_year(y)?;
            }
            report::print_yearly(store);
            report::print_monthly(store);
            Ok(false)
        }

        Command::Report { year } => {
            if let Some(y) = year {
                store.set_selected_year(y)?;
            }
            report::print_yearly(store);
            report::print_monthly(store);
            report::print_breakdown(store);
            Ok(false)
        }

        Command::Budget { command } => budget_cmd::run(command, store, &cfg.display.timezone),
        Command::Recurring { command } => recurring_cmd::run(command, store),
        Command::Savings { command } => savings_cmd::run(command, store),

        Command::Currency { code } => {
            let currency: Currency = code.parse()?;
            store.set_currency(currency);
            println!("Currency set to {}", currency);
            Ok(true)
        }

        Command::Year { year } => {
            store.set_selected_year(year)?;
            println!("Selected year: {}", year);
            Ok(true)
        }

        Command::Import { csv } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let rules = CategoryRules::builtin()?;
            let import = parse_transactions_csv(&csv, &rules)
                .with_context(|| format!("parsing {}", csv.display()))?;
            for skipped in &import.skipped {
                store.push_notice(
                    NoticeKind::Error,
                    format!("Skipped line {}: {}", skipped.line, skipped.reason),
                );
            }
            let count = store.import_transactions(import.transactions)?;
            info!(count, path = %csv.display(), "import finished");
            Ok(count > 0)
        }

        Command::Export { csv } => {
            export_transactions_csv(&csv, store.transactions())?;
            println!("Wrote {} transactions to {}", store.transactions().len(), csv.display());
            Ok(false)
        }

        Command::Config { command } => {
            run_config(command, cfg)?;
            Ok(false)
        }
    }
}

fn run_config(command: ConfigCommand, cfg: &Config) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config()?,
        ConfigCommand::Show => {
            println!("# {}\n", config::config_path()?.display());
            print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
        }
    }
    Ok(())
}

fn parse_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
    Ok(s.as_deref().map(parse_date).transpose()?)
}

fn print_notices(store: &mut BudgetStore) {
    for notice in store.drain_notices() {
        match notice.kind {
            NoticeKind::Success => println!("✓ {}", notice.message),
            NoticeKind::Error => eprintln!("✗ {}", notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg_with_timezone(tz: &str) -> Config {
        let mut cfg = Config::default();
        cfg.display.timezone = tz.to_string();
        cfg
    }

    fn store() -> BudgetStore {
        BudgetStore::new(Currency::INR, 2025).unwrap()
    }

    #[test]
    fn test_commands_without_dates_ignore_bad_timezone() {
        let cfg = cfg_with_timezone("Mars/Olympus_Mons");
        let mut store = store();

        assert!(run(Command::Currency { code: "usd".into() }, &cfg, &mut store).unwrap());
        assert_eq!(store.currency(), Currency::USD);
        assert!(!run(Command::Summary { year: None }, &cfg, &mut store).unwrap());

        let budget = Command::Budget {
            command: BudgetCommand::Status { month: Some(3) },
        };
        assert!(!run(budget, &cfg, &mut store).unwrap());
    }

    #[test]
    fn test_add_with_explicit_date_ignores_bad_timezone() {
        let cfg = cfg_with_timezone("Not/AZone");
        let mut store = store();
        let add = Command::Add {
            kind: Kind::Expense,
            amount: dec!(12.40),
            description: "Bus fare".into(),
            date: Some("2025-04-01".into()),
            category: None,
        };
        assert!(run(add, &cfg, &mut store).unwrap());
        let txn = &store.transactions()[0];
        assert_eq!(txn.amount, dec!(12.40));
        assert_eq!(txn.category, Some(ExpenseCategory::Transport));
    }

    #[test]
    fn test_add_defaulting_to_today_reports_bad_timezone() {
        let cfg = cfg_with_timezone("Not/AZone");
        let mut store = store();
        let add = Command::Add {
            kind: Kind::Income,
            amount: dec!(100),
            description: "Gift".into(),
            date: None,
            category: None,
        };
        assert!(run(add, &cfg, &mut store).is_err());
        assert!(store.transactions().is_empty());
    }
}
