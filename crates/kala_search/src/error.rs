//! Error types for constraint search.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kala_core::{Body, Instant, OracleError};
use kala_time::TimeError;

/// Errors from event search.
///
/// Exhausting the search range is not an error: solvers return `Ok(None)`.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// Search configuration is invalid.
    InvalidConfig(&'static str),
    /// A constraint failed validation before any oracle call.
    InvalidConstraint { index: usize, reason: &'static str },
    /// The longitude oracle failed while evaluating a constraint.
    Oracle {
        /// Kind of the constraint being evaluated (`aspect`, `in_sign`, `at_degree`).
        constraint: &'static str,
        body: Body,
        instant: Instant,
        source: OracleError,
    },
    /// Instant arithmetic left the representable range.
    Time(TimeError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidConstraint { index, reason } => {
                write!(f, "invalid constraint #{index}: {reason}")
            }
            Self::Oracle {
                constraint,
                body,
                instant,
                source,
            } => write!(
                f,
                "{constraint} constraint: longitude of {body} at {instant} failed: {source}"
            ),
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Oracle { source, .. } => Some(source),
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
