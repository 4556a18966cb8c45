//! Coercion of locale-formatted cells into numbers and dates.
//!
//! None of these fail: a cell that cannot be read yields 0 (or no date) so a
//! sloppy spreadsheet still renders.

use chrono::{DateTime, NaiveDate};
use tracing::debug;

const CURRENCY_CODE: &str = "mxn";

/// Parses currency and plain numbers such as `"$1,234.56 MXN"`.
pub fn parse_number(raw: &str) -> f64 {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
        .collect();

    if cleaned.to_lowercase().ends_with(CURRENCY_CODE) {
        cleaned.truncate(cleaned.len() - CURRENCY_CODE.len());
    }

    // Accounting style negatives: (1,000.00)
    let negative = cleaned.starts_with('(') && cleaned.ends_with(')');
    if negative {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }

    if cleaned.is_empty() || cleaned == "-" {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => {
            debug!("Unparsable number '{}', using 0", raw);
            0.0
        }
    }
}

/// Parses `"27.5%"` as `27.5`, the percentage itself rather than a ratio.
pub fn parse_percent(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            if !cleaned.is_empty() {
                debug!("Unparsable percent '{}', using 0", raw);
            }
            0.0
        }
    }
}

/// Parses multiples written as `"1.40x"`.
pub fn parse_multiple(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let without_suffix = trimmed
        .strip_suffix('x')
        .or_else(|| trimmed.strip_suffix('X'))
        .unwrap_or(trimmed);
    parse_number(without_suffix)
}

const FALLBACK_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%b-%Y", "%B %d, %Y"];

/// Parses `M/D/YYYY` ledger dates, falling back to a few common layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = parse_month_day_year(trimmed) {
        return Some(date);
    }

    for format in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.date_naive());
    }

    debug!("Unparsable date '{}'", raw);
    None
}

fn parse_month_day_year(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let short = |p: &str| (1..=2).contains(&p.len()) && p.chars().all(|c| c.is_ascii_digit());
    if !short(month) || !short(day) || year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
