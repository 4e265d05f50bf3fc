use chrono::NaiveDate;
use purse_core::{CategorySpend, Currency, ExpenseCategory, NoticeKind};
use purse_finance::{BudgetStore, CategoryRules, parse_transactions_csv};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("household-2025.csv")
}

fn loaded_store() -> BudgetStore {
    let rules = CategoryRules::builtin().unwrap();
    let import = parse_transactions_csv(fixture_path(), &rules).unwrap();
    let mut store = BudgetStore::new(Currency::INR, 2025).unwrap();
    store.import_transactions(import.transactions).unwrap();
    store.drain_notices();
    store
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_fixture_import_skips_bad_rows() {
    let rules = CategoryRules::builtin().unwrap();
    let import = parse_transactions_csv(fixture_path(), &rules).unwrap();
    assert_eq!(import.transactions.len(), 13);
    let lines: Vec<u64> = import.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![15, 16, 17]);
}

#[test]
fn test_monthly_and_yearly_totals() {
    let store = loaded_store();
    let months = store.monthly_summaries();

    assert_eq!(months[0].income, dec!(50000));
    assert_eq!(months[0].expenses, dec!(18650.5));
    assert_eq!(months[0].balance, dec!(31349.5));
    assert_eq!(months[1].expenses, dec!(16420.25));
    assert_eq!(months[2].income, dec!(62000));
    assert_eq!(months[2].balance, dec!(59800.25));
    assert!(months[3..].iter().all(|m| m.income == Decimal::ZERO && m.expenses == Decimal::ZERO));

    let year = store.yearly_summary();
    assert_eq!(year.total_income, dec!(162000));
    assert_eq!(year.total_expenses, dec!(37270.5));
    assert_eq!(year.total_balance, dec!(124729.5));
    assert_eq!(year.total_savings, Decimal::ZERO);
    assert_eq!(store.format_currency(year.total_balance), "₹1,24,729.50");
}

#[test]
fn test_category_breakdown_from_rules_and_columns() {
    let store = loaded_store();
    let breakdown = store.expense_categories();
    let expected = vec![
        (ExpenseCategory::Housing, dec!(30000)),
        (ExpenseCategory::Food, dec!(3200.5)),
        (ExpenseCategory::Utilities, dec!(2100)),
        (ExpenseCategory::Entertainment, dec!(800)),
        (ExpenseCategory::Health, dec!(620.25)),
        (ExpenseCategory::Transport, dec!(450)),
        (ExpenseCategory::Other, dec!(99.75)),
    ]
    .into_iter()
    .map(|(category, amount)| CategorySpend { category, amount })
    .collect::<Vec<_>>();
    assert_eq!(breakdown, expected);

    let sum: Decimal = breakdown.iter().map(|c| c.amount).sum();
    assert_eq!(sum, store.yearly_summary().total_expenses);
}

#[test]
fn test_recurring_and_savings_flow_into_reports() {
    let mut store = loaded_store();
    store.add_recurring_income("Rental income", dec!(1000)).unwrap();
    store
        .add_recurring_expense("Netflix", dec!(500), ExpenseCategory::Entertainment)
        .unwrap();
    store.add_savings_goal("Emergency fund", dec!(20000)).unwrap();
    store.add_savings_goal("Goa trip", dec!(5000)).unwrap();

    let months = store.monthly_summaries();
    assert_eq!(months[11].income, dec!(1000));
    assert_eq!(months[11].expenses, dec!(500));

    let year = store.yearly_summary();
    assert_eq!(year.total_income, dec!(174000));
    assert_eq!(year.total_expenses, dec!(43270.5));
    assert_eq!(year.total_balance, dec!(130729.5));
    assert_eq!(year.total_savings, dec!(25000));

    let entertainment = store
        .expense_categories()
        .into_iter()
        .find(|c| c.category == ExpenseCategory::Entertainment)
        .unwrap();
    assert_eq!(entertainment.amount, dec!(6800));

    let notices = store.drain_notices();
    assert_eq!(notices.len(), 4);
    assert!(notices.iter().all(|n| n.kind == NoticeKind::Success));
}

#[test]
fn test_filtered_views_over_fixture() {
    let mut store = loaded_store();

    store.set_search_query("salary");
    assert_eq!(store.income_transactions().len(), 3);
    assert!(store.expense_transactions().is_empty());

    store.clear_filters();
    store.set_category_filter(Some(ExpenseCategory::Housing));
    assert_eq!(store.expense_transactions().len(), 2);

    store.clear_filters();
    store
        .set_date_range(Some(date(2025, 2, 1)), Some(date(2025, 2, 28)))
        .unwrap();
    let feb = store.expense_transactions();
    assert_eq!(feb.len(), 3);
    assert_eq!(feb[0].description, "Pharmacy run");

    store.set_search_query("RENT");
    assert_eq!(store.expense_transactions().len(), 1);
}

#[test]
fn test_budget_status_for_january() {
    let mut store = loaded_store();
    store.set_category_budget(ExpenseCategory::Food, dec!(3000)).unwrap();
    store.set_category_budget(ExpenseCategory::Housing, dec!(20000)).unwrap();

    let progress = store.budget_progress(1).unwrap();
    assert_eq!(progress[0].category, ExpenseCategory::Food);
    assert!(progress[0].is_over());
    assert_eq!(progress[0].remaining(), dec!(-200.5));
    assert_eq!(progress[1].category, ExpenseCategory::Housing);
    assert!(!progress[1].is_over());
    assert_eq!(progress[1].spent, dec!(15000));
}

#[test]
fn test_previous_year_is_separate() {
    let mut store = loaded_store();
    store.set_selected_year(2024).unwrap();
    let year = store.yearly_summary();
    assert_eq!(year.total_income, Decimal::ZERO);
    assert_eq!(year.total_expenses, dec!(1800));
    assert_eq!(store.monthly_summaries()[11].expenses, dec!(1800));
}
