//! The longitude oracle contract.
//!
//! Searches never compute positions themselves; they ask an injected
//! [`LongitudeOracle`] for a body's ecliptic longitude at an instant. Any
//! total implementation works: a real ephemeris, an analytic model, or a
//! deterministic test fixture.

use kala_time::Instant;

use crate::body::Body;
use crate::error::OracleError;
use crate::zodiac::SignPosition;

/// Maps `(body, instant)` to ecliptic longitude in degrees [0, 360).
///
/// Implementations must be deterministic and safe to share across threads:
/// concurrent searches may call the same oracle without coordination.
///
/// ```rust,ignore
/// let oracle = Arc::new(MeanElementOracle::new());
/// let handle = std::thread::spawn({
///     let oracle = Arc::clone(&oracle);
///     move || oracle.longitude(Body::Sun, at)
/// });
/// ```
pub trait LongitudeOracle: Send + Sync {
    /// Ecliptic longitude of `body` at `at`, in degrees [0, 360).
    ///
    /// Fails for bodies the oracle does not model and for instants outside
    /// its valid range. Callers must not substitute a default on failure.
    fn longitude(&self, body: Body, at: Instant) -> Result<f64, OracleError>;

    /// Longitude decomposed into sign and degree within the sign.
    fn sign_position(&self, body: Body, at: Instant) -> Result<SignPosition, OracleError> {
        self.longitude(body, at).map(SignPosition::from_longitude)
    }
}

impl<F> LongitudeOracle for F
where
    F: Fn(Body, Instant) -> Result<f64, OracleError> + Send + Sync,
{
    fn longitude(&self, body: Body, at: Instant) -> Result<f64, OracleError> {
        self(body, at)
    }
}
