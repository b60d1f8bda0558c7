//! Epoch representation and calendar parsing shared across crates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::constants::{
    DAYS_PER_JULIAN_CENTURY, J2000_JULIAN_DAY, SECONDS_PER_DAY, TT_MINUS_UTC_SECONDS,
};

/// Julian day of the Unix epoch (1970-01-01T00:00:00 UTC).
const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Returned when a string is not a recognised calendar instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a recognised date or timestamp")]
pub struct InvalidInstant(pub String);

/// Parse RFC 3339 timestamps, naive date-times (taken as UTC), or bare
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, InvalidInstant> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| InvalidInstant(text.to_string()))
}

/// An instant on the Terrestrial Time scale, stored as a Julian day.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Epoch {
    julian_day_tt: f64,
}

impl Epoch {
    /// The J2000.0 reference epoch.
    pub const J2000: Epoch = Epoch {
        julian_day_tt: J2000_JULIAN_DAY,
    };

    pub fn from_julian_day_tt(julian_day_tt: f64) -> Self {
        Self { julian_day_tt }
    }

    /// Convert a UTC instant using the fixed TT − UTC offset.
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        let unix_seconds =
            instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
        let jd_utc = UNIX_EPOCH_JULIAN_DAY + unix_seconds / SECONDS_PER_DAY;
        Self {
            julian_day_tt: jd_utc + TT_MINUS_UTC_SECONDS / SECONDS_PER_DAY,
        }
    }

    /// Parse a calendar string (see [`parse_instant`]) into an epoch.
    pub fn parse(text: &str) -> Result<Self, InvalidInstant> {
        parse_instant(text).map(Self::from_utc)
    }

    pub fn julian_day_tt(self) -> f64 {
        self.julian_day_tt
    }

    pub fn days_since_j2000(self) -> f64 {
        self.julian_day_tt - J2000_JULIAN_DAY
    }

    pub fn centuries_since_j2000(self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }

    pub fn add_days(self, days: f64) -> Self {
        Self {
            julian_day_tt: self.julian_day_tt + days,
        }
    }

    /// Back-convert to UTC; `None` when outside chrono's representable range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let jd_utc = self.julian_day_tt - TT_MINUS_UTC_SECONDS / SECONDS_PER_DAY;
        let unix_seconds = (jd_utc - UNIX_EPOCH_JULIAN_DAY) * SECONDS_PER_DAY;
        let whole = unix_seconds.floor();
        let nanos = ((unix_seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
    }
}
