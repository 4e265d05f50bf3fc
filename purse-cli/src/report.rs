//! Plain-text rendering of summaries, breakdowns and lists.

use purse_core::{BudgetProgress, MONTH_ABBREVIATIONS, Transaction};
use purse_finance::BudgetStore;
use rust_decimal::Decimal;

pub fn print_yearly(store: &BudgetStore) {
    let year = store.yearly_summary();
    println!("# {} summary ({})\n", store.selected_year(), store.currency());
    println!("Income:    {:>18}", store.format_currency(year.total_income));
    println!("Expenses:  {:>18}", store.format_currency(year.total_expenses));
    println!("Balance:   {:>18}", store.format_currency(year.total_balance));
    println!("Savings:   {:>18}", store.format_currency(year.total_savings));
}

pub fn print_monthly(store: &BudgetStore) {
    println!("\n## Monthly balance\n");
    println!("{:<5} {:>18} {:>18} {:>18}", "Month", "Income", "Expenses", "Balance");
    for m in store.monthly_summaries() {
        println!(
            "{:<5} {:>18} {:>18} {:>18}",
            m.month,
            store.format_currency(m.income),
            store.format_currency(m.expenses),
            store.format_currency(m.balance)
        );
    }
}

pub fn print_breakdown(store: &BudgetStore) {
    println!("\n## Spending by category\n");
    let breakdown = store.expense_categories();
    if breakdown.is_empty() {
        println!("(no expenses recorded for {})", store.selected_year());
        return;
    }
    let total: Decimal = breakdown.iter().map(|c| c.amount).sum();
    for c in &breakdown {
        println!(
            "{:<14} {:>18} {:>6.1}%",
            c.category.label(),
            store.format_currency(c.amount),
            (c.amount / total * Decimal::ONE_HUNDRED).round_dp(1)
        );
    }
}

pub fn print_transactions(store: &BudgetStore, title: &str, txns: &[&Transaction]) {
    println!("\n## {} ({})\n", title, txns.len());
    if txns.is_empty() {
        println!("(none)");
        return;
    }
    for t in txns {
        println!(
            "{}  {:>16}  {:<13}  {}  [{}]",
            t.date,
            store.format_currency(t.amount),
            t.category.map(|c| c.label()).unwrap_or("-"),
            t.description,
            t.id
        );
    }
}

pub fn print_budget_progress(store: &BudgetStore, month: u32, progress: &[BudgetProgress]) {
    let name = MONTH_ABBREVIATIONS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    println!("# Budgets for {} {}\n", name, store.selected_year());
    if progress.is_empty() {
        println!("(no category budgets set; try `purse budget set Food 5000`)");
        return;
    }
    for p in progress {
        println!(
            "{:<14} {:>16} of {:>16}  {:>5}%{}",
            p.category.label(),
            store.format_currency(p.spent),
            store.format_currency(p.limit),
            (p.utilization() * Decimal::ONE_HUNDRED).round_dp(0),
            if p.is_over() {
                format!("  OVER by {}", store.format_currency(-p.remaining()))
            } else {
                String::new()
            }
        );
    }
}
