//! French display formatting for amounts, rates and dates.
//!
//! Every function here is total: missing or unusable input renders the
//! placeholder glyph instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use echeancier_types::DateValue;
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown in place of a missing value.
pub const PLACEHOLDER: &str = "—";

const GROUP_SEPARATOR: char = ' ';
const DECIMAL_SEPARATOR: char = ',';

/// Formats an amount with exactly two fraction digits, a comma decimal
/// separator and thousands grouped by spaces: `1234.5` → `1 234,50`.
///
/// Rounding follows the exact binary value of the input, so `1000.005`
/// (stored slightly below) gives `1 000,00`, while exact ties round away
/// from zero (`0.125` → `0,13`). Non-finite values are missing.
pub fn format_amount(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };

    let fixed = fixed_half_away(value.abs(), 2);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push(DECIMAL_SEPARATOR);
    out.push_str(frac_part);
    out
}

/// Fixed-point text with `places` decimals, rounding exact ties away from
/// zero. `{:.N}` on a float would round them to even.
fn fixed_half_away(value: f64, places: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", places as usize, rounded)
        }
        // Beyond Decimal's range; ties cannot occur at that magnitude.
        None => format!("{:.*}", places as usize, value),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Formats a fractional rate as a percentage with three decimals:
/// `0.035` → `3.500 %`.
///
/// Zero counts as missing, like an empty cell.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate.filter(|r| r.is_finite() && *r != 0.0) {
        Some(rate) => format!("{} %", fixed_half_away(rate * 100.0, 3)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Renders a date as `DD/MM/YYYY`.
///
/// Text may be an ISO date (`2024-03-15`), a naive date-time or an RFC 3339
/// timestamp; the calendar date as written is kept. Anything else is missing.
pub fn format_date(value: Option<&DateValue>) -> String {
    let date = match value {
        Some(DateValue::Date(date)) => Some(*date),
        Some(DateValue::Text(text)) => parse_date(text.trim()),
        None => None,
    };
    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|datetime| datetime.date())
}
