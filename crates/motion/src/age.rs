//! Elapsed-time breakdown for the "age" readout.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::Serialize;
use thiserror::Error;
use worldline_core::constants::{JULIAN_YEAR_SECONDS, SECONDS_PER_DAY};
use worldline_core::time::parse_instant;

/// Mean Gregorian month, used only when the calendar walk overflows chrono's range.
const MEAN_MONTH_SECONDS: f64 = JULIAN_YEAR_SECONDS / 12.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    #[error("invalid date `{input}`")]
    InvalidDate { input: String },
}

/// A calendar instant or a string still to be parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateInput<'a> {
    Instant(DateTime<Utc>),
    Text(&'a str),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value)
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value)
    }
}

impl DateInput<'_> {
    pub fn resolve(self) -> Result<DateTime<Utc>, AgeError> {
        match self {
            DateInput::Instant(instant) => Ok(instant),
            DateInput::Text(text) => parse_instant(text).map_err(|_| AgeError::InvalidDate {
                input: text.to_string(),
            }),
        }
    }
}

/// Seconds from `birth` to `target`; negative when `target` precedes `birth`.
pub fn compute_duration_seconds<'a>(
    birth: impl Into<DateInput<'a>>,
    target: impl Into<DateInput<'a>>,
) -> Result<f64, AgeError> {
    let birth = birth.into().resolve()?;
    let target = target.into().resolve()?;
    let delta = target - birth;
    let whole = delta.num_seconds() as f64;
    let nanos = (delta - TimeDelta::seconds(delta.num_seconds()))
        .num_nanoseconds()
        .unwrap_or(0) as f64;
    Ok(whole + nanos * 1e-9)
}

/// Calendar-style decomposition of an elapsed duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeDuration {
    pub total_seconds: f64,
    pub total_days: f64,
    pub total_years: f64,
    pub years: u64,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Set when the duration is negative; calendar fields are then all zero.
    pub is_pre_birth: bool,
}

fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Break `seconds` into years, months, days and h:m:s by walking the
/// Gregorian calendar forward from 1970-01-01T00:00:00. Totals keep their
/// sign; non-finite input yields zeroed calendar fields.
pub fn breakdown_duration(seconds: f64) -> AgeDuration {
    let mut out = AgeDuration {
        total_seconds: seconds,
        total_days: seconds / SECONDS_PER_DAY,
        total_years: seconds / JULIAN_YEAR_SECONDS,
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        is_pre_birth: seconds < 0.0,
    };
    if out.is_pre_birth || !seconds.is_finite() {
        return out;
    }

    let whole = seconds.floor();
    let (years, months, remainder) =
        calendar_walk(whole).unwrap_or_else(|| mean_calendar_split(whole));
    let remainder = remainder as u64;
    out.years = years;
    out.months = months;
    out.days = (remainder / 86_400) as u32;
    out.hours = ((remainder % 86_400) / 3_600) as u32;
    out.minutes = ((remainder % 3_600) / 60) as u32;
    out.seconds = (remainder % 60) as u32;
    out
}

/// Whole years and months between the anchor and `anchor + seconds`, plus the
/// leftover seconds.
fn calendar_walk(seconds: f64) -> Option<(u64, u32, f64)> {
    if seconds > i64::MAX as f64 {
        return None;
    }
    let start = anchor();
    let end = start.checked_add_signed(TimeDelta::try_seconds(seconds as i64)?)?;

    let mut years = u32::try_from(end.year() - start.year()).ok()?;
    let mut cursor = start.checked_add_months(Months::new(years.checked_mul(12)?))?;
    while cursor > end {
        years -= 1;
        cursor = start.checked_add_months(Months::new(years * 12))?;
    }

    let mut months = 0;
    while months < 12 {
        match cursor.checked_add_months(Months::new(months + 1)) {
            Some(next) if next <= end => months += 1,
            _ => break,
        }
    }
    let cursor = cursor.checked_add_months(Months::new(months))?;
    let remainder = (end - cursor).num_seconds() as f64;
    Some((u64::from(years), months, remainder))
}

fn mean_calendar_split(seconds: f64) -> (u64, u32, f64) {
    let years = (seconds / JULIAN_YEAR_SECONDS).floor();
    let rest = seconds - years * JULIAN_YEAR_SECONDS;
    let months = (rest / MEAN_MONTH_SECONDS).floor();
    (years as u64, months as u32, (rest - months * MEAN_MONTH_SECONDS).floor())
}

/// Fixed layout: `"{y}y {m}m {d}d | {HH}h:{MM}m:{SS}s"`.
pub fn format_duration(duration: &AgeDuration) -> String {
    format!(
        "{}y {}m {}d | {:02}h:{:02}m:{:02}s",
        duration.years,
        duration.months,
        duration.days,
        duration.hours,
        duration.minutes,
        duration.seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_julian_year_is_one_calendar_year() {
        let age = breakdown_duration(JULIAN_YEAR_SECONDS);
        assert_eq!((age.years, age.months, age.days), (1, 0, 0));
        assert_eq!(age.hours, 6);
        assert!((age.total_years - 1.0).abs() < 1e-15);
    }

    #[test]
    fn negative_duration_is_pre_birth_with_zeroed_fields() {
        let age = breakdown_duration(-12_345.0);
        assert!(age.is_pre_birth);
        assert_eq!(
            (age.years, age.months, age.days, age.hours, age.minutes, age.seconds),
            (0, 0, 0, 0, 0, 0)
        );
        assert_eq!(age.total_seconds, -12_345.0);
    }

    #[test]
    fn month_boundaries_follow_calendar_lengths() {
        // January has 31 days, so 31 days from the anchor is exactly one month.
        let age = breakdown_duration(31.0 * SECONDS_PER_DAY + 3_723.0);
        assert_eq!((age.years, age.months, age.days), (0, 1, 0));
        assert_eq!((age.hours, age.minutes, age.seconds), (1, 2, 3));
    }

    #[test]
    fn formats_with_padded_clock() {
        let age = breakdown_duration(2.0 * JULIAN_YEAR_SECONDS + 65.0);
        assert_eq!(format_duration(&age), "2y 0m 0d | 12h:01m:05s");
    }

    #[test]
    fn duration_between_text_dates() {
        let secs = compute_duration_seconds("2000-01-01", "2000-01-02T00:00:30Z").unwrap();
        assert_eq!(secs, 86_430.0);
        let back = compute_duration_seconds("2000-01-02", "2000-01-01").unwrap();
        assert_eq!(back, -86_400.0);
    }

    #[test]
    fn unparsable_date_is_invalid_not_nan() {
        let err = compute_duration_seconds("1990-13-01", "2020-01-01").unwrap_err();
        assert_eq!(
            err,
            AgeError::InvalidDate {
                input: "1990-13-01".to_string()
            }
        );
    }

    #[test]
    fn absurdly_long_durations_fall_back_to_mean_calendar() {
        let age = breakdown_duration(1.0e6 * JULIAN_YEAR_SECONDS);
        assert_eq!(age.years, 1_000_000);
    }
}
