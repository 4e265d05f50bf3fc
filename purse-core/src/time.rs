//! Date utilities: ISO date parsing, calendar bounds and timezone-aware "today".

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::BudgetError;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date.
pub fn parse_date(s: &str) -> Result<NaiveDate, BudgetError> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| BudgetError::InvalidDate(s.to_string()))
}

/// Years must be representable and four-digit.
pub fn validate_year(year: i32) -> Result<i32, BudgetError> {
    if (1..=9999).contains(&year) && NaiveDate::from_ymd_opt(year, 1, 1).is_some() {
        Ok(year)
    } else {
        Err(BudgetError::InvalidYear(year))
    }
}

/// 1-based month.
pub fn validate_month(month: u32) -> Result<u32, BudgetError> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(BudgetError::InvalidMonth(month))
    }
}

/// Current calendar date in an IANA timezone like "Asia/Kolkata".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_and_rfc3339() {
        let d = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(parse_date("2025-07-04").unwrap(), d);
        assert_eq!(parse_date("2025-07-04T10:30:00.000Z").unwrap(), d);
        assert_eq!(
            parse_date("04/07/2025"),
            Err(BudgetError::InvalidDate("04/07/2025".into()))
        );
    }

    #[test]
    fn test_year_and_month_bounds() {
        assert_eq!(validate_year(2025), Ok(2025));
        assert!(validate_year(0).is_err());
        assert!(validate_year(10_000).is_err());
        assert_eq!(validate_month(12), Ok(12));
        assert_eq!(validate_month(13), Err(BudgetError::InvalidMonth(13)));
    }

    #[test]
    fn test_today_rejects_bad_timezone() {
        assert!(today_in("Asia/Kolkata").is_ok());
        assert!(today_in("Mars/Olympus").is_err());
    }
}
