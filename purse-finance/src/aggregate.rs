//! Reductions from raw records to monthly, yearly and per-category totals.
//!
//! Recurring incomes and expenses count once in every month of the year, so
//! `sum(monthly) == yearly` and `sum(category_breakdown) == total_expenses`.

use chrono::Datelike;
use purse_core::{
    BudgetProgress, CategoryBudget, CategorySpend, ExpenseCategory, MONTH_ABBREVIATIONS,
    MonthlySummary, RecurringExpense, RecurringIncome, SavingsGoal, Transaction, TransactionType,
    YearlySummary,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Twelve summaries, January first, for `year`.
pub fn monthly_summaries(
    transactions: &[Transaction],
    recurring_incomes: &[RecurringIncome],
    recurring_expenses: &[RecurringExpense],
    year: i32,
) -> Vec<MonthlySummary> {
    let mut income = [Decimal::ZERO; 12];
    let mut expenses = [Decimal::ZERO; 12];

    for txn in transactions.iter().filter(|t| t.in_year(year)) {
        let idx = txn.date.month0() as usize;
        match txn.kind {
            TransactionType::Income => income[idx] += txn.amount,
            TransactionType::Expense => expenses[idx] += txn.amount,
        }
    }

    let recurring_in: Decimal = recurring_incomes.iter().map(|r| r.amount).sum();
    let recurring_out: Decimal = recurring_expenses.iter().map(|r| r.amount).sum();

    MONTH_ABBREVIATIONS
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let income = income[idx] + recurring_in;
            let expenses = expenses[idx] + recurring_out;
            MonthlySummary {
                month: name.to_string(),
                month_index: idx,
                income,
                expenses,
                balance: income - expenses,
            }
        })
        .collect()
}

pub fn yearly_summary(monthly: &[MonthlySummary], savings_goals: &[SavingsGoal]) -> YearlySummary {
    let total_income: Decimal = monthly.iter().map(|m| m.income).sum();
    let total_expenses: Decimal = monthly.iter().map(|m| m.expenses).sum();
    YearlySummary {
        total_income,
        total_expenses,
        total_balance: total_income - total_expenses,
        total_savings: savings_goals.iter().map(|g| g.amount).sum(),
    }
}

/// Expense totals per category for `year`, largest first. Empty buckets are omitted.
pub fn category_breakdown(
    transactions: &[Transaction],
    recurring_expenses: &[RecurringExpense],
    year: i32,
) -> Vec<CategorySpend> {
    let expenses = transactions.iter().filter(|t| t.is_expense() && t.in_year(year));
    let totals = spend_by_category(expenses, recurring_expenses, Decimal::from(12));

    let mut breakdown: Vec<CategorySpend> = totals
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, amount)| CategorySpend { category, amount })
        .collect();
    // stable: equal amounts keep category order
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
    breakdown
}

/// Spending against each budget in one month (`month` is 1-based).
pub fn budget_progress(
    budgets: &[CategoryBudget],
    transactions: &[Transaction],
    recurring_expenses: &[RecurringExpense],
    year: i32,
    month: u32,
) -> Vec<BudgetProgress> {
    let expenses = transactions
        .iter()
        .filter(|t| t.is_expense() && t.in_month(year, month));
    let spent = spend_by_category(expenses, recurring_expenses, Decimal::ONE);

    let mut progress: Vec<BudgetProgress> = budgets
        .iter()
        .map(|b| BudgetProgress {
            category: b.category,
            limit: b.amount,
            spent: spent.get(&b.category).copied().unwrap_or_default(),
        })
        .collect();
    progress.sort_by_key(|p| p.category);
    progress
}

fn spend_by_category<'a>(
    expenses: impl Iterator<Item = &'a Transaction>,
    recurring_expenses: &[RecurringExpense],
    months: Decimal,
) -> BTreeMap<ExpenseCategory, Decimal> {
    let mut totals: BTreeMap<ExpenseCategory, Decimal> = BTreeMap::new();
    for txn in expenses {
        *totals.entry(txn.spend_category()).or_default() += txn.amount;
    }
    for r in recurring_expenses {
        *totals.entry(r.category).or_default() += r.amount * months;
    }
    totals
}
