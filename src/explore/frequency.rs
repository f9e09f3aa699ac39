//! Human frequency strings, range-step rules and date boundary lists.
//!
//! Catalog frequencies read like "1 monthly" or "6 hourly". The date-range
//! slider needs a compact step rule ("1M", "6H") and the list of boundary
//! dates it generates between a variable's time bounds.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::explore::ExploreError;

static FREQ_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+) (\w)\w+").expect("frequency pattern is valid")
});

/// "1 monthly" -> "1M", "6 hourly" -> "6H". Inputs that do not lead with
/// "<count> <unit-word>" pass through uppercased ("static" -> "STATIC").
pub fn frequency_to_rule(frequency: &str) -> String {
    let upper = frequency.to_uppercase();
    FREQ_RULE.replace(&upper, "$1$2").into_owned()
}

/// Inclusive boundary list from `start`, stepping by `rule`, up to `end`.
///
/// Steps are always taken from `start` so month-length clamping cannot
/// drift: "1M" from Jan 31 yields Jan 31, Feb 28, Mar 31, ...
pub fn date_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
    rule: &str,
) -> Result<Vec<NaiveDateTime>, ExploreError> {
    if end < start {
        return Err(ExploreError::BadRange(format!("{end} precedes {start}")));
    }
    let (count, unit) = parse_rule(rule)?;

    let mut dates = Vec::new();
    let mut steps: u32 = 0;
    let mut current = start;
    while current <= end {
        dates.push(current);
        steps += count;
        current = match unit {
            'Y' => add_months(start, steps.saturating_mul(12))
                .ok_or_else(|| ExploreError::BadRange(format!("date overflow in {rule}")))?,
            'M' => add_months(start, steps)
                .ok_or_else(|| ExploreError::BadRange(format!("date overflow in {rule}")))?,
            'W' => start + Duration::weeks(i64::from(steps)),
            'D' => start + Duration::days(i64::from(steps)),
            'H' => start + Duration::hours(i64::from(steps)),
            _ => unreachable!("parse_rule admits only known units"),
        };
    }
    Ok(dates)
}

/// Split a rule like "3H" into (count, unit letter). A missing count means 1.
fn parse_rule(rule: &str) -> Result<(u32, char), ExploreError> {
    let digits: String = rule.chars().take_while(char::is_ascii_digit).collect();
    let count: u32 = if digits.is_empty() {
        1
    } else {
        digits
            .parse()
            .map_err(|_| ExploreError::BadFrequency(rule.to_string()))?
    };
    let unit = rule[digits.len()..]
        .chars()
        .next()
        .ok_or_else(|| ExploreError::BadFrequency(rule.to_string()))?;
    if !matches!(unit, 'Y' | 'M' | 'W' | 'D' | 'H') {
        return Err(ExploreError::BadFrequency(rule.to_string()));
    }
    Ok((count.max(1), unit))
}

/// Calendar month addition with day-of-month clamping.
fn add_months(from: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    let zero_based = from.year().checked_mul(12)? + from.month0() as i32 + i32::try_from(months).ok()?;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = from.day().min(days_in_month(year, month));
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    date.and_hms_opt(from.hour(), from.minute(), from.second())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}
