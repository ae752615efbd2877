//! Analytic longitude oracle built from mean orbital elements.
//!
//! [`MeanElementOracle`] implements [`LongitudeOracle`] without kernel files
//! or network access. It trades accuracy (arc-minutes for the Sun, tenths of
//! a degree for the Moon and planets) for being self-contained, which makes
//! it suitable for the command-line tool and for reproducible tests.
//!
//! Coverage:
//! - Sun, Moon: *Astronomical Almanac* low-precision series
//! - Mercury .. Pluto: JPL approximate Keplerian elements
//! - North/South node: mean lunar node
//! - Chiron, Ceres, Pallas, Juno, Vesta: not modeled
//!   ([`OracleError::UnsupportedBody`])
//!
//! UTC is used directly as the dynamical time argument; the resulting
//! offset (about a minute of time) is below the model's own error.

pub mod luminaries;
pub mod planets;

use std::ops::Range;

use kala_core::{Body, Instant, LongitudeOracle, OracleError};
use kala_time::J2000_JD;

use crate::planets::Planet;

/// Start of the element table's validity (1800-01-01T00:00:00Z), Unix ms.
const VALID_FROM_UNIX_MS: i64 = -5_364_662_400_000;

/// End of validity, exclusive (2051-01-01T00:00:00Z), Unix ms.
const VALID_UNTIL_UNIX_MS: i64 = 2_556_144_000_000;

/// Self-contained low-precision longitude oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeanElementOracle {
    _private: (),
}

impl MeanElementOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Half-open validity range `[from, until)` in Unix milliseconds.
    pub const fn valid_range_ms(&self) -> Range<i64> {
        VALID_FROM_UNIX_MS..VALID_UNTIL_UNIX_MS
    }

    /// Whether this oracle models `body` at all.
    pub const fn supports(body: Body) -> bool {
        !matches!(
            body,
            Body::Chiron | Body::Ceres | Body::Pallas | Body::Juno | Body::Vesta
        )
    }
}

impl LongitudeOracle for MeanElementOracle {
    fn longitude(&self, body: Body, at: Instant) -> Result<f64, OracleError> {
        if !Self::supports(body) {
            return Err(OracleError::UnsupportedBody(body));
        }
        if !self.valid_range_ms().contains(&at.unix_ms()) {
            return Err(OracleError::OutOfRange { body, instant: at });
        }

        let days = at.jd_utc() - J2000_JD;
        let t = at.centuries_since_j2000();
        let lon = match body {
            Body::Sun => luminaries::sun_longitude_deg(days),
            Body::Moon => luminaries::moon_longitude_deg(t),
            Body::NorthNode => luminaries::mean_north_node_deg(t),
            Body::SouthNode => luminaries::mean_south_node_deg(t),
            Body::Mercury => planets::geocentric_longitude_deg(Planet::Mercury, t),
            Body::Venus => planets::geocentric_longitude_deg(Planet::Venus, t),
            Body::Mars => planets::geocentric_longitude_deg(Planet::Mars, t),
            Body::Jupiter => planets::geocentric_longitude_deg(Planet::Jupiter, t),
            Body::Saturn => planets::geocentric_longitude_deg(Planet::Saturn, t),
            Body::Uranus => planets::geocentric_longitude_deg(Planet::Uranus, t),
            Body::Neptune => planets::geocentric_longitude_deg(Planet::Neptune, t),
            Body::Pluto => planets::geocentric_longitude_deg(Planet::Pluto, t),
            Body::Chiron | Body::Ceres | Body::Pallas | Body::Juno | Body::Vesta => {
                return Err(OracleError::UnsupportedBody(body));
            }
        };

        if lon.is_finite() {
            Ok(lon)
        } else {
            Err(OracleError::Computation(format!(
                "non-finite longitude for {body} at {at}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kala_core::ZodiacSign;

    #[test]
    fn minor_bodies_unsupported() {
        let oracle = MeanElementOracle::new();
        let at = Instant::from_utc(2026, 1, 1, 0, 0, 0).unwrap();
        for body in [Body::Chiron, Body::Ceres, Body::Pallas, Body::Juno, Body::Vesta] {
            assert_eq!(
                oracle.longitude(body, at),
                Err(OracleError::UnsupportedBody(body))
            );
        }
    }

    #[test]
    fn out_of_range_rejected() {
        let oracle = MeanElementOracle::new();
        let early = Instant::from_utc(1799, 12, 31, 23, 59, 59).unwrap();
        let late = Instant::from_utc(2051, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            oracle.longitude(Body::Sun, early),
            Err(OracleError::OutOfRange { body: Body::Sun, .. })
        ));
        assert!(matches!(
            oracle.longitude(Body::Mars, late),
            Err(OracleError::OutOfRange { .. })
        ));
    }

    #[test]
    fn range_edges() {
        let oracle = MeanElementOracle::new();
        let range = oracle.valid_range_ms();
        let from = Instant::from_utc(1800, 1, 1, 0, 0, 0).unwrap();
        let until = Instant::from_utc(2051, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(range, from.unix_ms()..until.unix_ms());
        assert!(oracle.longitude(Body::Moon, from).is_ok());
    }

    #[test]
    fn every_supported_body_in_range() {
        let oracle = MeanElementOracle::new();
        let at = Instant::from_utc(2026, 6, 1, 0, 0, 0).unwrap();
        for body in Body::all() {
            if MeanElementOracle::supports(*body) {
                let lon = oracle.longitude(*body, at).unwrap();
                assert!((0.0..360.0).contains(&lon), "{body}: {lon}");
            }
        }
    }

    #[test]
    fn sun_in_capricorn_new_year_2026() {
        let oracle = MeanElementOracle::new();
        let at = Instant::from_utc(2026, 1, 1, 0, 0, 0).unwrap();
        let p = oracle.sign_position(Body::Sun, at).unwrap();
        assert_eq!(p.sign, ZodiacSign::Capricorn);
    }

    #[test]
    fn slow_planets_new_year_2026() {
        let oracle = MeanElementOracle::new();
        let at = Instant::from_utc(2026, 1, 1, 0, 0, 0).unwrap();
        let jupiter = oracle.sign_position(Body::Jupiter, at).unwrap();
        let saturn = oracle.sign_position(Body::Saturn, at).unwrap();
        assert_eq!(jupiter.sign, ZodiacSign::Cancer);
        assert_eq!(saturn.sign, ZodiacSign::Pisces);
    }
}
