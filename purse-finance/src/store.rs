//! In-memory budget state and the mutations that keep it consistent.
//!
//! Every successful mutation queues a success notice; callers drain notices
//! after a command and show them to the user. Filters and notices are view
//! state and are not persisted. A deserialized store is checked against the
//! same rules the mutations enforce.

use chrono::NaiveDate;
use purse_core::error::{ensure_positive, ensure_text};
use purse_core::{
    BudgetError, BudgetProgress, CategoryBudget, CategorySpend, Currency, ExpenseCategory,
    MonthlySummary, NewTransaction, Notice, NoticeKind, RecurringExpense, RecurringIncome,
    SavingsGoal, Transaction, TransactionType, YearlySummary, validate_month, validate_year,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::aggregate;
use crate::filter::{DateRange, TransactionFilter};

/// Records that live in a list and are addressed by id
trait Identified {
    const KIND: &'static str;
    fn id(&self) -> &str;
}

impl Identified for Transaction {
    const KIND: &'static str = "transaction";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for RecurringIncome {
    const KIND: &'static str = "recurring income";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for RecurringExpense {
    const KIND: &'static str = "recurring expense";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for SavingsGoal {
    const KIND: &'static str = "savings goal";
    fn id(&self) -> &str {
        &self.id
    }
}

fn position<T: Identified>(items: &[T], id: &str) -> Result<usize, BudgetError> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| BudgetError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
}

fn replace_by_id<T: Identified>(items: &mut [T], item: T) -> Result<(), BudgetError> {
    let idx = position(items, item.id())?;
    items[idx] = item;
    Ok(())
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> Result<T, BudgetError> {
    let idx = position(items, id)?;
    Ok(items.remove(idx))
}

fn ensure_unique_ids<T: Identified>(items: &[T]) -> Result<(), BudgetError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(BudgetError::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
    }
    Ok(())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn normalize_transaction(mut txn: Transaction) -> Result<Transaction, BudgetError> {
    txn.description = ensure_text("description", &txn.description)?;
    txn.amount = ensure_positive(txn.amount)?;
    if txn.kind == TransactionType::Income {
        txn.category = None;
    }
    Ok(txn)
}

fn normalize_recurring_income(mut item: RecurringIncome) -> Result<RecurringIncome, BudgetError> {
    item.description = ensure_text("description", &item.description)?;
    item.amount = ensure_positive(item.amount)?;
    Ok(item)
}

fn normalize_recurring_expense(mut item: RecurringExpense) -> Result<RecurringExpense, BudgetError> {
    item.description = ensure_text("description", &item.description)?;
    item.amount = ensure_positive(item.amount)?;
    Ok(item)
}

fn normalize_savings_goal(mut goal: SavingsGoal) -> Result<SavingsGoal, BudgetError> {
    goal.destination = ensure_text("destination", &goal.destination)?;
    goal.amount = ensure_positive(goal.amount)?;
    Ok(goal)
}

/// Persisted fields as read from disk, before validation
#[derive(Debug, Deserialize)]
struct StoredBudget {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    recurring_incomes: Vec<RecurringIncome>,
    #[serde(default)]
    recurring_expenses: Vec<RecurringExpense>,
    #[serde(default)]
    savings_goals: Vec<SavingsGoal>,
    #[serde(default)]
    category_budgets: Vec<CategoryBudget>,
    #[serde(default)]
    currency: Currency,
    selected_year: i32,
}

impl TryFrom<StoredBudget> for BudgetStore {
    type Error = BudgetError;

    fn try_from(stored: StoredBudget) -> Result<Self, Self::Error> {
        let mut store = BudgetStore::new(stored.currency, stored.selected_year)?;

        store.transactions = stored
            .transactions
            .into_iter()
            .map(normalize_transaction)
            .collect::<Result<_, _>>()?;
        store.recurring_incomes = stored
            .recurring_incomes
            .into_iter()
            .map(normalize_recurring_income)
            .collect::<Result<_, _>>()?;
        store.recurring_expenses = stored
            .recurring_expenses
            .into_iter()
            .map(normalize_recurring_expense)
            .collect::<Result<_, _>>()?;
        store.savings_goals = stored
            .savings_goals
            .into_iter()
            .map(normalize_savings_goal)
            .collect::<Result<_, _>>()?;
        ensure_unique_ids(&store.transactions)?;
        ensure_unique_ids(&store.recurring_incomes)?;
        ensure_unique_ids(&store.recurring_expenses)?;
        ensure_unique_ids(&store.savings_goals)?;

        let mut categories = HashSet::new();
        for budget in &stored.category_budgets {
            ensure_positive(budget.amount)?;
            if !categories.insert(budget.category) {
                return Err(BudgetError::DuplicateBudget(budget.category));
            }
        }
        store.category_budgets = stored.category_budgets;

        Ok(store)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredBudget")]
pub struct BudgetStore {
    transactions: Vec<Transaction>,
    recurring_incomes: Vec<RecurringIncome>,
    recurring_expenses: Vec<RecurringExpense>,
    savings_goals: Vec<SavingsGoal>,
    category_budgets: Vec<CategoryBudget>,
    currency: Currency,
    selected_year: i32,
    #[serde(skip)]
    filter: TransactionFilter,
    #[serde(skip)]
    notices: Vec<Notice>,
}

impl BudgetStore {
    pub fn new(currency: Currency, selected_year: i32) -> Result<Self, BudgetError> {
        Ok(Self {
            transactions: Vec::new(),
            recurring_incomes: Vec::new(),
            recurring_expenses: Vec::new(),
            savings_goals: Vec::new(),
            category_budgets: Vec::new(),
            currency,
            selected_year: validate_year(selected_year)?,
            filter: TransactionFilter::default(),
            notices: Vec::new(),
        })
    }

    // --- Accessors ---

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn recurring_incomes(&self) -> &[RecurringIncome] {
        &self.recurring_incomes
    }

    pub fn recurring_income(&self, id: &str) -> Option<&RecurringIncome> {
        self.recurring_incomes.iter().find(|r| r.id == id)
    }

    pub fn recurring_expenses(&self) -> &[RecurringExpense] {
        &self.recurring_expenses
    }

    pub fn recurring_expense(&self, id: &str) -> Option<&RecurringExpense> {
        self.recurring_expenses.iter().find(|r| r.id == id)
    }

    pub fn savings_goals(&self) -> &[SavingsGoal] {
        &self.savings_goals
    }

    pub fn savings_goal(&self, id: &str) -> Option<&SavingsGoal> {
        self.savings_goals.iter().find(|g| g.id == id)
    }

    pub fn category_budgets(&self) -> &[CategoryBudget] {
        &self.category_budgets
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    // --- Transactions ---

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction, BudgetError> {
        let txn = normalize_transaction(new.with_id(new_id()))?;
        info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, date = %txn.date, "transaction added");
        self.transactions.push(txn.clone());
        self.notify(match txn.kind {
            TransactionType::Income => "Income added",
            TransactionType::Expense => "Expense added",
        });
        Ok(txn)
    }

    /// Add many transactions at once; nothing is added if any of them is invalid.
    pub fn import_transactions(&mut self, new: Vec<NewTransaction>) -> Result<usize, BudgetError> {
        let txns = new
            .into_iter()
            .map(|n| normalize_transaction(n.with_id(new_id())))
            .collect::<Result<Vec<_>, _>>()?;
        let count = txns.len();
        self.transactions.extend(txns);
        info!(count, "transactions imported");
        self.notify(format!("Imported {count} transactions"));
        Ok(count)
    }

    pub fn update_transaction(&mut self, txn: Transaction) -> Result<(), BudgetError> {
        let txn = normalize_transaction(txn)?;
        let id = txn.id.clone();
        replace_by_id(&mut self.transactions, txn)?;
        info!(%id, "transaction updated");
        self.notify("Transaction updated");
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, BudgetError> {
        let removed = remove_by_id(&mut self.transactions, id)?;
        info!(id, "transaction deleted");
        self.notify("Transaction deleted");
        Ok(removed)
    }

    // --- Recurring incomes ---

    pub fn add_recurring_income(
        &mut self,
        description: &str,
        amount: Decimal,
    ) -> Result<RecurringIncome, BudgetError> {
        let item = RecurringIncome {
            id: new_id(),
            description: ensure_text("description", description)?,
            amount: ensure_positive(amount)?,
        };
        info!(id = %item.id, amount = %item.amount, "recurring income added");
        self.recurring_incomes.push(item.clone());
        self.notify("Recurring income added");
        Ok(item)
    }

    pub fn update_recurring_income(&mut self, item: RecurringIncome) -> Result<(), BudgetError> {
        let item = normalize_recurring_income(item)?;
        replace_by_id(&mut self.recurring_incomes, item)?;
        self.notify("Recurring income updated");
        Ok(())
    }

    pub fn delete_recurring_income(&mut self, id: &str) -> Result<RecurringIncome, BudgetError> {
        let removed = remove_by_id(&mut self.recurring_incomes, id)?;
        info!(id, "recurring income deleted");
        self.notify("Recurring income deleted");
        Ok(removed)
    }

    // --- Recurring expenses ---

    pub fn add_recurring_expense(
        &mut self,
        description: &str,
        amount: Decimal,
        category: ExpenseCategory,
    ) -> Result<RecurringExpense, BudgetError> {
        let item = RecurringExpense {
            id: new_id(),
            description: ensure_text("description", description)?,
            amount: ensure_positive(amount)?,
            category,
        };
        info!(id = %item.id, amount = %item.amount, %category, "recurring expense added");
        self.recurring_expenses.push(item.clone());
        self.notify("Recurring expense added");
        Ok(item)
    }

    pub fn update_recurring_expense(&mut self, item: RecurringExpense) -> Result<(), BudgetError> {
        let item = normalize_recurring_expense(item)?;
        replace_by_id(&mut self.recurring_expenses, item)?;
        self.notify("Recurring expense updated");
        Ok(())
    }

    pub fn delete_recurring_expense(&mut self, id: &str) -> Result<RecurringExpense, BudgetError> {
        let removed = remove_by_id(&mut self.recurring_expenses, id)?;
        info!(id, "recurring expense deleted");
        self.notify("Recurring expense deleted");
        Ok(removed)
    }

    // --- Savings goals ---

    pub fn add_savings_goal(&mut self, destination: &str, amount: Decimal) -> Result<SavingsGoal, BudgetError> {
        let goal = SavingsGoal {
            id: new_id(),
            destination: ensure_text("destination", destination)?,
            amount: ensure_positive(amount)?,
        };
        info!(id = %goal.id, amount = %goal.amount, "savings goal added");
        self.savings_goals.push(goal.clone());
        self.notify("Savings goal added");
        Ok(goal)
    }

    pub fn update_savings_goal(&mut self, goal: SavingsGoal) -> Result<(), BudgetError> {
        let goal = normalize_savings_goal(goal)?;
        replace_by_id(&mut self.savings_goals, goal)?;
        self.notify("Savings goal updated");
        Ok(())
    }

    pub fn delete_savings_goal(&mut self, id: &str) -> Result<SavingsGoal, BudgetError> {
        let removed = remove_by_id(&mut self.savings_goals, id)?;
        info!(id, "savings goal deleted");
        self.notify("Savings goal deleted");
        Ok(removed)
    }

    // --- Category budgets ---

    /// Insert or replace the monthly limit for a category.
    pub fn set_category_budget(&mut self, category: ExpenseCategory, amount: Decimal) -> Result<(), BudgetError> {
        let amount = ensure_positive(amount)?;
        match self.category_budgets.iter_mut().find(|b| b.category == category) {
            Some(existing) => existing.amount = amount,
            None => self.category_budgets.push(CategoryBudget { category, amount }),
        }
        info!(%category, %amount, "category budget set");
        self.notify(format!("Budget for {category} set"));
        Ok(())
    }

    pub fn delete_category_budget(&mut self, category: ExpenseCategory) -> Result<CategoryBudget, BudgetError> {
        let idx = self
            .category_budgets
            .iter()
            .position(|b| b.category == category)
            .ok_or(BudgetError::NoBudget(category))?;
        let removed = self.category_budgets.remove(idx);
        info!(%category, "category budget deleted");
        self.notify(format!("Budget for {category} removed"));
        Ok(removed)
    }

    // --- Settings ---

    pub fn set_currency(&mut self, currency: Currency) {
        debug!(%currency, "currency changed");
        self.currency = currency;
    }

    pub fn set_selected_year(&mut self, year: i32) -> Result<(), BudgetError> {
        self.selected_year = validate_year(year)?;
        debug!(year, "selected year changed");
        Ok(())
    }

    // --- Filters ---

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
    }

    pub fn set_category_filter(&mut self, category: Option<ExpenseCategory>) {
        self.filter.category = category;
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), BudgetError> {
        self.filter.date_range = DateRange::new(start, end)?;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filter = TransactionFilter::default();
    }

    // --- Notices ---

    pub fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) -> String {
        let id = new_id();
        self.notices.push(Notice {
            id: id.clone(),
            message: message.into(),
            kind,
        });
        id
    }

    /// Returns false when no notice has that id.
    pub fn dismiss_notice(&mut self, id: &str) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.push_notice(NoticeKind::Success, message);
    }

    // --- Derived views ---

    pub fn monthly_summaries(&self) -> Vec<MonthlySummary> {
        aggregate::monthly_summaries(
            &self.transactions,
            &self.recurring_incomes,
            &self.recurring_expenses,
            self.selected_year,
        )
    }

    pub fn yearly_summary(&self) -> YearlySummary {
        aggregate::yearly_summary(&self.monthly_summaries(), &self.savings_goals)
    }

    pub fn expense_categories(&self) -> Vec<CategorySpend> {
        aggregate::category_breakdown(&self.transactions, &self.recurring_expenses, self.selected_year)
    }

    pub fn income_transactions(&self) -> Vec<&Transaction> {
        self.filter
            .select(&self.transactions, self.selected_year, TransactionType::Income)
    }

    pub fn expense_transactions(&self) -> Vec<&Transaction> {
        self.filter
            .select(&self.transactions, self.selected_year, TransactionType::Expense)
    }

    /// Budget status for a 1-based month of the selected year.
    pub fn budget_progress(&self, month: u32) -> Result<Vec<BudgetProgress>, BudgetError> {
        let month = validate_month(month)?;
        Ok(aggregate::budget_progress(
            &self.category_budgets,
            &self.transactions,
            &self.recurring_expenses,
            self.selected_year,
            month,
        ))
    }

    pub fn format_currency(&self, amount: Decimal) -> String {
        self.currency.format(amount)
    }
}
