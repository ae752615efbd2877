//! Error types for instant parsing and arithmetic.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from building, parsing, or shifting an [`Instant`](crate::Instant).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeError {
    /// Text could not be read as an ISO-8601 / RFC 3339 instant.
    InvalidInstant(String),
    /// Calendar fields do not name a real UTC date/time.
    InvalidCalendar {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },
    /// Result falls outside the representable UTC range.
    OutOfRange,
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInstant(text) => write!(f, "invalid instant: {text:?}"),
            Self::InvalidCalendar {
                year,
                month,
                day,
                hour,
                minute,
                second,
            } => write!(
                f,
                "invalid calendar date/time: {year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"
            ),
            Self::OutOfRange => write!(f, "instant outside representable UTC range"),
        }
    }
}

impl Error for TimeError {}
