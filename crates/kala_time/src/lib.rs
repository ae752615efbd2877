//! UTC instants for longitude-constraint searches.
//!
//! This crate provides:
//! - [`Instant`], an immutable UTC point in time with millisecond resolution
//! - ISO-8601 / RFC 3339 parsing and `toISOString`-style formatting
//! - Checked arithmetic with [`chrono::Duration`]
//! - Julian Date conversion for analytic ephemerides

pub mod error;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use chrono::Duration;
pub use error::TimeError;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date of J2000.0 (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Milliseconds per day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// A UTC instant with millisecond resolution.
///
/// Always lies within the range chrono can represent, so formatting and
/// calendar conversion never fail once an `Instant` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    unix_ms: i64,
}

impl Instant {
    /// Build an instant from milliseconds since the Unix epoch.
    pub fn from_unix_ms(unix_ms: i64) -> Result<Self, TimeError> {
        DateTime::<Utc>::from_timestamp_millis(unix_ms)
            .map(|_| Self { unix_ms })
            .ok_or(TimeError::OutOfRange)
    }

    /// Build an instant from UTC calendar fields (whole seconds).
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, TimeError> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or(TimeError::InvalidCalendar {
                year,
                month,
                day,
                hour,
                minute,
                second,
            })?;
        Ok(Self::from(Utc.from_utc_datetime(&naive)))
    }

    /// Parse an ISO-8601 instant.
    ///
    /// Accepts RFC 3339 with any offset (`2026-01-01T00:00:00Z`,
    /// `2026-01-01T01:00:00+01:00`), a zone-less date-time read as UTC
    /// (`2026-01-01T00:00:00.250`), or a bare date read as UTC midnight.
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let s = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from(dt.with_timezone(&Utc)));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self::from(Utc.from_utc_datetime(&naive)));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from(Utc.from_utc_datetime(&naive)));
            }
        }
        Err(TimeError::InvalidInstant(text.to_string()))
    }

    /// The current system time.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Milliseconds since the Unix epoch.
    pub const fn unix_ms(self) -> i64 {
        self.unix_ms
    }

    /// The instant as a chrono UTC date-time.
    pub fn to_datetime(self) -> DateTime<Utc> {
        // Range was checked on construction.
        DateTime::<Utc>::from_timestamp_millis(self.unix_ms).unwrap_or_default()
    }

    /// Julian Date on the UTC time scale.
    pub fn jd_utc(self) -> f64 {
        self.unix_ms as f64 / MS_PER_DAY + UNIX_EPOCH_JD
    }

    /// Julian centuries since J2000.0 (UTC used in place of TT).
    pub fn centuries_since_j2000(self) -> f64 {
        (self.jd_utc() - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Shift by a (possibly negative) duration.
    pub fn checked_add(self, span: Duration) -> Result<Self, TimeError> {
        self.unix_ms
            .checked_add(span.num_milliseconds())
            .ok_or(TimeError::OutOfRange)
            .and_then(Self::from_unix_ms)
    }

    /// Shift backwards by a duration.
    pub fn checked_sub(self, span: Duration) -> Result<Self, TimeError> {
        self.unix_ms
            .checked_sub(span.num_milliseconds())
            .ok_or(TimeError::OutOfRange)
            .and_then(Self::from_unix_ms)
    }

    /// Midpoint of two instants, rounded toward negative infinity.
    pub fn midpoint(self, other: Self) -> Self {
        // Both operands sit inside chrono's range (|ms| < 2^53), so the sum
        // cannot overflow and the floor lies between them.
        Self {
            unix_ms: (self.unix_ms + other.unix_ms).div_euclid(2),
        }
    }

    /// Signed span from `earlier` to `self`.
    pub fn since(self, earlier: Self) -> Duration {
        Duration::milliseconds(self.unix_ms - earlier.unix_ms)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            unix_ms: dt.timestamp_millis(),
        }
    }
}

impl FromStr for Instant {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_datetime().to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
