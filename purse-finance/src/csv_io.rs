//! Import and export transactions as CSV.
//!
//! Expected header (case-sensitive, extra columns ignored):
//! date,description,amount[,type][,category]
//!
//! Amounts may carry currency markers (`₹`, `$`, `Rs.`, `INR`, `USD`) and
//! thousands separators. When `type` is blank the sign decides:
//! negative = expense, positive = income. Rows that are not valid UTF-8 are
//! skipped like any other unreadable row.

use anyhow::{Context, Result};
use purse_core::{
    BudgetError, ExpenseCategory, NewTransaction, Transaction, TransactionType, parse_date,
};
use csv::StringRecord;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::category_rules::CategoryRules;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    description: String,
    amount: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Serialize)]
struct CsvOutRow<'a> {
    date: String,
    description: &'a str,
    amount: Decimal,
    #[serde(rename = "type")]
    kind: &'static str,
    category: &'static str,
}

/// A row that could not be turned into a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Result of reading a CSV: parsed rows plus the ones that were skipped
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    pub transactions: Vec<NewTransaction>,
    pub skipped: Vec<SkippedRow>,
}

/// Read a transactions CSV from disk.
pub fn parse_transactions_csv(path: impl AsRef<Path>, rules: &CategoryRules) -> Result<CsvImport> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_transactions_csv(file, rules).with_context(|| format!("reading {}", path.as_ref().display()))
}

pub fn read_transactions_csv<R: Read>(reader: R, rules: &CategoryRules) -> Result<CsvImport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("reading CSV header")?.clone();
    let amounts = AmountParser::new()?;

    let mut out = CsvImport::default();
    for result in rdr.byte_records() {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let record = match StringRecord::from_byte_record(raw) {
            Ok(record) => record,
            Err(err) => {
                let reason = format!("row is not valid UTF-8: {err}");
                warn!(line, %reason, "skipping CSV row");
                out.skipped.push(SkippedRow { line, reason });
                continue;
            }
        };
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let parsed = record
            .deserialize::<CsvRow>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(|row| row_to_transaction(row, &amounts, rules));

        match parsed {
            Ok(txn) => out.transactions.push(txn),
            Err(reason) => {
                warn!(line, %reason, "skipping CSV row");
                out.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    debug!(
        parsed = out.transactions.len(),
        skipped = out.skipped.len(),
        "read transactions CSV"
    );
    Ok(out)
}

fn row_to_transaction(
    row: CsvRow,
    amounts: &AmountParser,
    rules: &CategoryRules,
) -> Result<NewTransaction, String> {
    let date = parse_date(&row.date).map_err(|e| e.to_string())?;

    if row.description.is_empty() {
        return Err(BudgetError::MissingField("description").to_string());
    }

    let signed = amounts
        .parse(&row.amount)
        .ok_or_else(|| format!("invalid amount '{}'", row.amount))?;
    if signed.is_zero() {
        return Err("amount is zero".to_string());
    }

    let kind = match row.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(k) => k.parse::<TransactionType>().map_err(|e| e.to_string())?,
        None if signed.is_sign_negative() => TransactionType::Expense,
        None => TransactionType::Income,
    };

    let txn = match kind {
        TransactionType::Income => NewTransaction::income(row.description, signed.abs(), date),
        TransactionType::Expense => {
            let category = match row.category.as_deref().filter(|c| !c.is_empty()) {
                Some(c) => c.parse::<ExpenseCategory>().map_err(|e| e.to_string())?,
                None => rules.categorize(&row.description),
            };
            NewTransaction::expense(row.description, signed.abs(), date, Some(category))
        }
    };
    Ok(txn)
}

/// Turns free-form amount text into a signed decimal
struct AmountParser {
    currency: Regex,
    separators: Regex,
}

impl AmountParser {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            currency: Regex::new(r"(?i)rs\.?|inr|usd|[₹$]")?,
            separators: Regex::new(r"[\s,']")?,
        })
    }

    /// "(1,200.50)", "-₹1,200.50" and "Rs. -1,200.50" all parse to -1200.50.
    /// Anything left over after removing currency markers and separators
    /// makes the amount invalid.
    fn parse(&self, raw: &str) -> Option<Decimal> {
        let raw = raw.trim();
        let (negative, body) = match raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            Some(inner) => (true, inner),
            None => (false, raw),
        };
        let body = self.currency.replace_all(body, "");
        let cleaned = self.separators.replace_all(&body, "");
        let value = Decimal::from_str(&cleaned).ok()?;
        Some(if negative { -value } else { value })
    }
}

/// Write transactions with the same header the importer reads.
pub fn write_transactions_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for txn in transactions {
        wtr.serialize(CsvOutRow {
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: &txn.description,
            amount: txn.amount,
            kind: txn.kind.as_str(),
            category: txn.category.map(|c| c.label()).unwrap_or(""),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_transactions_csv(path: impl AsRef<Path>, transactions: &[Transaction]) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_transactions_csv(file, transactions)
        .with_context(|| format!("writing {}", path.as_ref().display()))
}
