//! Errors reported by longitude oracles.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kala_time::{Instant, TimeError};

use crate::body::Body;

/// Failure of a longitude lookup.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum OracleError {
    /// The oracle has no model for this body.
    UnsupportedBody(Body),
    /// The instant lies outside the oracle's valid range.
    OutOfRange { body: Body, instant: Instant },
    /// The underlying computation failed.
    Computation(String),
    /// Time conversion inside the oracle failed.
    Time(TimeError),
}

impl Display for OracleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBody(body) => write!(f, "unsupported body: {body}"),
            Self::OutOfRange { body, instant } => {
                write!(f, "{body} at {instant} is outside the ephemeris range")
            }
            Self::Computation(msg) => write!(f, "computation failed: {msg}"),
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for OracleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for OracleError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
