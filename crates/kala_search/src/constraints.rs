//! Constraint evaluation against a longitude oracle.
//!
//! Each predicate asks the oracle for the longitudes it needs and compares
//! them on the circle. Oracle failures are reported, never read as `false`.

use kala_core::{
    Body, Instant, LongitudeOracle, OracleError, ZodiacSign, angular_difference,
    circular_distance,
};

use crate::constraint_types::{AspectKind, Constraint};
use crate::error::SearchError;

/// Distance in degrees between the observed separation of two longitudes
/// and the target angle of `aspect`.
///
/// The separation is taken unsigned, so the result is symmetric in the two
/// longitudes. The `360 - target` branch matters only for targets above 180.
pub fn aspect_error(lon_a: f64, lon_b: f64, aspect: AspectKind) -> f64 {
    let diff = angular_difference(lon_a, lon_b).abs();
    let target = aspect.angle_deg();
    (diff - target).abs().min((diff - (360.0 - target)).abs())
}

/// Whether `constraint` holds at `at`.
pub fn evaluate<O>(oracle: &O, at: Instant, constraint: &Constraint) -> Result<bool, SearchError>
where
    O: LongitudeOracle + ?Sized,
{
    let lon = |body: Body| -> Result<f64, SearchError> {
        let fail = |source: OracleError| SearchError::Oracle {
            constraint: constraint.kind(),
            body,
            instant: at,
            source,
        };
        let lon = oracle.longitude(body, at).map_err(&fail)?;
        if lon.is_finite() {
            Ok(lon)
        } else {
            // NaN compares false everywhere; report it instead.
            Err(fail(OracleError::Computation(format!(
                "non-finite longitude {lon} for {body} at {at}"
            ))))
        }
    };

    match *constraint {
        Constraint::Aspect {
            body_a,
            body_b,
            aspect,
            orb,
        } => {
            let lon_a = lon(body_a)?;
            let lon_b = lon(body_b)?;
            Ok(aspect_error(lon_a, lon_b, aspect) <= orb)
        }
        Constraint::InSign { body, sign } => Ok(ZodiacSign::from_longitude(lon(body)?) == sign),
        Constraint::AtDegree { body, degree, orb } => {
            Ok(circular_distance(lon(body)?, degree) <= orb)
        }
    }
}

/// Whether every constraint holds at `at`.
///
/// Stops at the first constraint that does not hold; later constraints are
/// not evaluated and their bodies are not looked up. An empty set holds.
pub fn evaluate_all<O>(
    oracle: &O,
    at: Instant,
    constraints: &[Constraint],
) -> Result<bool, SearchError>
where
    O: LongitudeOracle + ?Sized,
{
    for constraint in constraints {
        if !evaluate(oracle, at, constraint)? {
            return Ok(false);
        }
    }
    Ok(true)
}
