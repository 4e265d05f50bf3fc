use anyhow::{Context, Result};
use clap::Subcommand;
use purse_finance::BudgetStore;
use rust_decimal::Decimal;

#[derive(Subcommand, Debug)]
pub enum SavingsCommand {
    /// Set money aside for a destination
    Add {
        #[arg(long)]
        destination: String,
        #[arg(long)]
        amount: Decimal,
    },
    Edit {
        id: String,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        amount: Option<Decimal>,
    },
    Remove { id: String },
    List,
}

/// Returns true when the store changed.
pub fn run(command: SavingsCommand, store: &mut BudgetStore) -> Result<bool> {
    match command {
        SavingsCommand::Add { destination, amount } => {
            let goal = store.add_savings_goal(&destination, amount)?;
            println!("{}", goal.id);
            Ok(true)
        }
        SavingsCommand::Edit { id, destination, amount } => {
            let mut goal = store
                .savings_goal(&id)
                .cloned()
                .with_context(|| format!("no savings goal with id {id}"))?;
            if let Some(d) = destination {
                goal.destination = d;
            }
            if let Some(a) = amount {
                goal.amount = a;
            }
            store.update_savings_goal(goal)?;
            Ok(true)
        }
        SavingsCommand::Remove { id } => {
            store.delete_savings_goal(&id)?;
            Ok(true)
        }
        SavingsCommand::List => {
            let goals = store.savings_goals();
            if goals.is_empty() {
                println!("(no savings goals)");
            }
            for g in goals {
                println!("{:>16}  {}  [{}]", store.format_currency(g.amount), g.destination, g.id);
            }
            let total: Decimal = goals.iter().map(|g| g.amount).sum();
            println!("\nTotal saved: {}", store.format_currency(total));
            Ok(false)
        }
    }
}
