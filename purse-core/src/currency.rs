//! Currency selection and amount formatting

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
        }
    }

    /// Render an amount with two decimals and the currency's digit grouping:
    /// `$1,234,567.00` for USD, `₹12,34,567.00` for INR.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        // -0.004 rounds to -0.00, which must not print a sign
        let negative = rounded < Decimal::ZERO;
        let cents = (rounded.abs() * Decimal::ONE_HUNDRED)
            .trunc()
            .normalize()
            .to_string();
        let cents = format!("{cents:0>3}");
        let (whole, fraction) = cents.split_at(cents.len() - 2);
        let grouped = match self {
            Currency::USD => group_digits(whole, 3, 3),
            Currency::INR => group_digits(whole, 3, 2),
        };
        format!(
            "{}{}{}.{}",
            if negative { "-" } else { "" },
            self.symbol(),
            grouped,
            fraction
        )
    }
}

/// Insert commas: the rightmost group has `first` digits, the others `rest`.
fn group_digits(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail];
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(rest);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.join(",")
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::INR),
            "USD" => Ok(Currency::USD),
            other => Err(BudgetError::UnknownCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_grouping() {
        assert_eq!(Currency::USD.format(Decimal::ZERO), "$0.00");
        assert_eq!(Currency::USD.format(dec!(999.5)), "$999.50");
        assert_eq!(Currency::USD.format(dec!(1234.567)), "$1,234.57");
        assert_eq!(Currency::USD.format(dec!(1234567)), "$1,234,567.00");
    }

    #[test]
    fn test_inr_grouping() {
        assert_eq!(Currency::INR.format(dec!(512)), "₹512.00");
        assert_eq!(Currency::INR.format(dec!(1234.5)), "₹1,234.50");
        assert_eq!(Currency::INR.format(dec!(123456.78)), "₹1,23,456.78");
        assert_eq!(Currency::INR.format(dec!(12345678)), "₹1,23,45,678.00");
    }

    #[test]
    fn test_negative_and_negative_zero() {
        assert_eq!(Currency::USD.format(dec!(-1500)), "-$1,500.00");
        assert_eq!(Currency::INR.format(dec!(-250000)), "-₹2,50,000.00");
        assert_eq!(Currency::USD.format(dec!(-0.004)), "$0.00");
    }

    #[test]
    fn test_half_cent_rounds_away_from_zero() {
        assert_eq!(Currency::USD.format(dec!(0.005)), "$0.01");
        assert_eq!(Currency::USD.format(dec!(2.345)), "$2.35");
        assert_eq!(Currency::INR.format(dec!(-0.015)), "-₹0.02");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!("usd".parse::<Currency>(), Ok(Currency::USD));
        assert_eq!("INR".parse::<Currency>(), Ok(Currency::INR));
        assert_eq!(
            "eur".parse::<Currency>(),
            Err(BudgetError::UnknownCurrency("EUR".into()))
        );
    }
}
