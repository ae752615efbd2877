//! Point lookups: one body's position, or every body at once.

use serde::Serialize;

use kala_core::{Body, Instant, LongitudeOracle, OracleError, ZodiacSign};

/// A body's longitude decomposed into zodiac sign and degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub body: Body,
    /// Ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    pub sign: ZodiacSign,
    /// Degrees within the sign [0, 30).
    pub degree_in_sign: f64,
}

/// Positions of all bodies at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkySnapshot {
    pub at: Instant,
    /// Supported bodies in canonical order.
    pub positions: Vec<PlanetPosition>,
    /// Bodies the oracle does not model.
    pub unsupported: Vec<Body>,
}

/// Position of `body` at `at`.
pub fn planet_position<O>(oracle: &O, body: Body, at: Instant) -> Result<PlanetPosition, OracleError>
where
    O: LongitudeOracle + ?Sized,
{
    let p = oracle.sign_position(body, at)?;
    Ok(PlanetPosition {
        body,
        longitude_deg: p.longitude_deg,
        sign: p.sign,
        degree_in_sign: p.degree_in_sign,
    })
}

/// Positions of every [`Body`] at `at`.
///
/// Bodies the oracle rejects as unsupported are listed separately; any other
/// oracle failure fails the snapshot.
pub fn sky_at<O>(oracle: &O, at: Instant) -> Result<SkySnapshot, OracleError>
where
    O: LongitudeOracle + ?Sized,
{
    let mut positions = Vec::with_capacity(Body::all().len());
    let mut unsupported = Vec::new();

    for &body in Body::all() {
        match planet_position(oracle, body, at) {
            Ok(p) => positions.push(p),
            Err(OracleError::UnsupportedBody(b)) => unsupported.push(b),
            Err(e) => return Err(e),
        }
    }

    Ok(SkySnapshot {
        at,
        positions,
        unsupported,
    })
}
