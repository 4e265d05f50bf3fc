//! Deterministic keyword rules mapping a free-text description to an
//! ExpenseCategory. Used when an expense arrives without a category.
//!
//! Rules are checked in order; the first match wins, so more specific
//! phrases ("uber eats") sit above broader ones ("uber").

use purse_core::ExpenseCategory;
use regex::Regex;

const RULES: &[(ExpenseCategory, &str)] = &[
    (
        ExpenseCategory::Housing,
        r"rent|lease|landlord|mortgage|apartment|hoa|property tax|maintenance fee",
    ),
    (
        ExpenseCategory::Utilities,
        r"electricity|electric|water bill|gas bill|internet|broadband|wi-?fi|phone bill|recharge|utilit(?:y|ies)",
    ),
    (
        ExpenseCategory::Food,
        r"groceries|grocery|restaurants?|cafe|coffee|swiggy|zomato|doordash|uber eats|dining|lunch|dinner|breakfast|bakery|supermarket",
    ),
    (
        ExpenseCategory::Health,
        r"pharmacy|doctor|hospital|clinic|dental|dentist|medicines?|insurance|gym|fitness",
    ),
    (
        ExpenseCategory::Entertainment,
        r"netflix|spotify|prime video|hotstar|movies?|cinema|concert|games?|gaming|steam|theatre|theater",
    ),
    (
        ExpenseCategory::Transport,
        r"uber|lyft|ola|taxi|cab|metro|bus|train|railway|fuel|petrol|diesel|parking|toll|flight|airline",
    ),
    (
        ExpenseCategory::Shopping,
        r"amazon|flipkart|myntra|mall|clothing|clothes|shoes|electronics|store",
    ),
];

/// Compiled keyword rules
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<(ExpenseCategory, Regex)>,
}

impl CategoryRules {
    /// Built-in rule set. Whole-word, case-insensitive matching.
    pub fn builtin() -> Result<Self, regex::Error> {
        let rules = RULES
            .iter()
            .map(|(category, words)| Ok((*category, Regex::new(&format!(r"(?i)\b(?:{words})\b"))?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Best-guess category; `Other` when nothing matches.
    pub fn categorize(&self, description: &str) -> ExpenseCategory {
        self.rules
            .iter()
            .find(|(_, re)| re.is_match(description))
            .map(|(category, _)| *category)
            .unwrap_or(ExpenseCategory::Other)
    }
}
