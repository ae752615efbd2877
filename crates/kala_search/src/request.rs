//! JSON request boundary for event search.
//!
//! Requests arrive loosely typed (every field optional, names as strings)
//! and are checked here before the solver sees them, so the solver only ever
//! receives a closed [`Constraint`] set. Error strings are the ones API
//! clients already match on.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use kala_core::{Body, Instant, LongitudeOracle, ZodiacSign};

use crate::constraint_types::{AspectKind, Constraint};
use crate::error::SearchError;
use crate::search_types::{SearchConfig, SearchDirection};
use crate::solver::find_event;

pub const MSG_CONSTRAINTS_REQUIRED: &str = "Constraints are required";
pub const MSG_INVALID_DIRECTION: &str = "Invalid or missing direction";
pub const MSG_INVALID_START_TIME: &str = "Invalid or missing startTime";
pub const MSG_INVALID_ASPECT: &str = "Invalid aspect constraint";
pub const MSG_INVALID_IN_SIGN: &str = "Invalid in_sign constraint";
pub const MSG_INVALID_AT_DEGREE: &str = "Invalid at_degree constraint";
pub const MSG_NOT_FOUND: &str = "Event not found within search bounds";

/// One constraint as sent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConstraint {
    pub kind: Option<String>,
    pub planet_a: Option<String>,
    pub planet_b: Option<String>,
    pub aspect: Option<String>,
    pub orb: Option<f64>,
    pub planet: Option<String>,
    pub sign: Option<String>,
    pub degree: Option<f64>,
}

/// A find-event request as sent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindEventRequest {
    pub constraints: Option<Vec<RawConstraint>>,
    pub direction: Option<String>,
    pub start_time: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FindEventQuery {
    pub constraints: Vec<Constraint>,
    pub direction: SearchDirection,
    pub start: Instant,
}

impl FindEventRequest {
    /// Parse a JSON request body.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Check the request, in the order clients expect errors reported:
    /// constraints present, direction, start time, then each constraint.
    pub fn validate(&self) -> Result<FindEventQuery, String> {
        let raw = match &self.constraints {
            Some(list) if !list.is_empty() => list,
            _ => return Err(MSG_CONSTRAINTS_REQUIRED.to_string()),
        };

        let direction = match self.direction.as_deref() {
            Some("future") => SearchDirection::Future,
            Some("past") => SearchDirection::Past,
            _ => return Err(MSG_INVALID_DIRECTION.to_string()),
        };

        let start = self
            .start_time
            .as_deref()
            .and_then(|s| Instant::parse(s).ok())
            .ok_or_else(|| MSG_INVALID_START_TIME.to_string())?;

        let constraints = raw
            .iter()
            .map(RawConstraint::to_constraint)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FindEventQuery {
            constraints,
            direction,
            start,
        })
    }
}

impl RawConstraint {
    /// Convert to a typed constraint, or the client-facing error message.
    pub fn to_constraint(&self) -> Result<Constraint, String> {
        match self.kind.as_deref() {
            Some("aspect") => self.to_aspect().ok_or_else(|| MSG_INVALID_ASPECT.to_string()),
            Some("in_sign") => self.to_in_sign().ok_or_else(|| MSG_INVALID_IN_SIGN.to_string()),
            Some("at_degree") => self
                .to_at_degree()
                .ok_or_else(|| MSG_INVALID_AT_DEGREE.to_string()),
            other => {
                let kind = other.unwrap_or("(missing)");
                warn!(kind, "rejecting constraint of unknown kind");
                Err(format!("Unknown constraint kind: {kind}"))
            }
        }
    }

    fn to_aspect(&self) -> Option<Constraint> {
        let body_a = wire_body(self.planet_a.as_deref()?)?;
        let body_b = wire_body(self.planet_b.as_deref()?)?;
        let aspect = wire_aspect(self.aspect.as_deref()?)?;
        let orb = self.orb.filter(|o| o.is_finite() && *o >= 0.0)?;
        Some(Constraint::aspect(body_a, body_b, aspect, orb))
    }

    fn to_in_sign(&self) -> Option<Constraint> {
        let body = wire_body(self.planet.as_deref()?)?;
        let sign = wire_sign(self.sign.as_deref()?)?;
        Some(Constraint::in_sign(body, sign))
    }

    fn to_at_degree(&self) -> Option<Constraint> {
        let body = wire_body(self.planet.as_deref()?)?;
        let degree = self.degree.filter(|d| (0.0..360.0).contains(d))?;
        let orb = self.orb.filter(|o| o.is_finite() && *o >= 0.0)?;
        Some(Constraint::at_degree(body, degree, orb))
    }
}

// Wire names are exact: no case folding or aliases.

fn wire_body(name: &str) -> Option<Body> {
    Body::all().iter().copied().find(|b| b.name() == name)
}

fn wire_sign(name: &str) -> Option<ZodiacSign> {
    ZodiacSign::all().iter().copied().find(|s| s.name() == name)
}

fn wire_aspect(name: &str) -> Option<AspectKind> {
    AspectKind::all().iter().copied().find(|a| a.name() == name)
}

/// Response to a find-event request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found { timestamp: Instant },
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl Outcome {
    /// HTTP-style status code.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Found { .. } => 200,
            Self::NotFound => 404,
            Self::BadRequest(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Response body: `{"timestamp": ...}` on success, `{"error": ...}` otherwise.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Found { timestamp } => json!({ "timestamp": timestamp.to_string() }),
            Self::NotFound => json!({ "error": MSG_NOT_FOUND }),
            Self::BadRequest(msg) | Self::Internal(msg) => json!({ "error": msg }),
        }
    }
}

impl From<Result<Option<Instant>, SearchError>> for Outcome {
    fn from(result: Result<Option<Instant>, SearchError>) -> Self {
        match result {
            Ok(Some(timestamp)) => Self::Found { timestamp },
            Ok(None) => Self::NotFound,
            Err(e @ SearchError::InvalidConstraint { .. }) => Self::BadRequest(e.to_string()),
            Err(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Validate `request` and run the search.
pub fn handle_find_event<O>(oracle: &O, request: &FindEventRequest, config: &SearchConfig) -> Outcome
where
    O: LongitudeOracle + ?Sized,
{
    match request.validate() {
        Ok(query) => find_event(
            oracle,
            &query.constraints,
            query.direction,
            query.start,
            config,
        )
        .into(),
        Err(msg) => Outcome::BadRequest(msg),
    }
}

/// [`handle_find_event`] on a raw JSON body; malformed JSON is a bad request.
pub fn handle_find_event_json<O>(oracle: &O, body: &str, config: &SearchConfig) -> Outcome
where
    O: LongitudeOracle + ?Sized,
{
    match FindEventRequest::from_json(body) {
        Ok(request) => handle_find_event(oracle, &request, config),
        Err(e) => Outcome::BadRequest(format!("Invalid request body: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> FindEventRequest {
        FindEventRequest::from_json(text).unwrap()
    }

    #[test]
    fn parses_wire_shape() {
        let req = parse(
            r#"{
                "constraints": [
                    {"kind": "aspect", "planetA": "Sun", "planetB": "Moon", "aspect": "conjunction", "orb": 2},
                    {"kind": "in_sign", "planet": "Sun", "sign": "Pisces"}
                ],
                "direction": "future",
                "startTime": "2026-01-01T00:00:00Z"
            }"#,
        );
        let q = req.validate().unwrap();
        assert_eq!(q.direction, SearchDirection::Future);
        assert_eq!(q.start, Instant::from_utc(2026, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            q.constraints,
            vec![
                Constraint::aspect(Body::Sun, Body::Moon, AspectKind::Conjunction, 2.0),
                Constraint::in_sign(Body::Sun, ZodiacSign::Pisces),
            ]
        );
    }

    #[test]
    fn empty_constraints_rejected_first() {
        let req = parse(r#"{"constraints": [], "direction": "sideways"}"#);
        assert_eq!(req.validate().unwrap_err(), MSG_CONSTRAINTS_REQUIRED);
        let req = parse(r#"{"direction": "future"}"#);
        assert_eq!(req.validate().unwrap_err(), MSG_CONSTRAINTS_REQUIRED);
    }

    #[test]
    fn direction_is_exact() {
        let req = parse(
            r#"{"constraints": [{"kind": "in_sign", "planet": "Sun", "sign": "Leo"}],
                "direction": "Future", "startTime": "2026-01-01T00:00:00Z"}"#,
        );
        assert_eq!(req.validate().unwrap_err(), MSG_INVALID_DIRECTION);
    }

    #[test]
    fn bad_start_time() {
        let req = parse(
            r#"{"constraints": [{"kind": "in_sign", "planet": "Sun", "sign": "Leo"}],
                "direction": "past", "startTime": "tomorrow"}"#,
        );
        assert_eq!(req.validate().unwrap_err(), MSG_INVALID_START_TIME);
    }

    #[test]
    fn aspect_field_checks() {
        let bad = [
            r#"{"kind": "aspect", "planetA": "Sun", "planetB": "Moon", "aspect": "conjunction"}"#,
            r#"{"kind": "aspect", "planetA": "Sun", "planetB": "Moon", "aspect": "conjunction", "orb": -1}"#,
            r#"{"kind": "aspect", "planetA": "sun", "planetB": "Moon", "aspect": "conjunction", "orb": 1}"#,
            r#"{"kind": "aspect", "planetA": "Sun", "planetB": "Moon", "aspect": "quincunx", "orb": 1}"#,
        ];
        for c in bad {
            let raw: RawConstraint = serde_json::from_str(c).unwrap();
            assert_eq!(raw.to_constraint().unwrap_err(), MSG_INVALID_ASPECT, "{c}");
        }
    }

    #[test]
    fn zero_orb_is_allowed() {
        let raw: RawConstraint = serde_json::from_str(
            r#"{"kind": "aspect", "planetA": "Sun", "planetB": "Moon", "aspect": "trine", "orb": 0}"#,
        )
        .unwrap();
        assert!(raw.to_constraint().is_ok());
    }

    #[test]
    fn at_degree_range() {
        let raw: RawConstraint =
            serde_json::from_str(r#"{"kind": "at_degree", "planet": "Mars", "degree": 360, "orb": 1}"#)
                .unwrap();
        assert_eq!(raw.to_constraint().unwrap_err(), MSG_INVALID_AT_DEGREE);
        let raw: RawConstraint =
            serde_json::from_str(r#"{"kind": "at_degree", "planet": "Mars", "degree": 0, "orb": 1}"#)
                .unwrap();
        assert_eq!(
            raw.to_constraint().unwrap(),
            Constraint::at_degree(Body::Mars, 0.0, 1.0)
        );
    }

    #[test]
    fn in_sign_checks() {
        let raw: RawConstraint =
            serde_json::from_str(r#"{"kind": "in_sign", "planet": "Sun", "sign": "Ophiuchus"}"#)
                .unwrap();
        assert_eq!(raw.to_constraint().unwrap_err(), MSG_INVALID_IN_SIGN);
    }

    #[test]
    fn unknown_kind_is_bad_request() {
        let raw: RawConstraint =
            serde_json::from_str(r#"{"kind": "retrograde", "planet": "Mercury"}"#).unwrap();
        assert_eq!(
            raw.to_constraint().unwrap_err(),
            "Unknown constraint kind: retrograde"
        );
        let raw = RawConstraint::default();
        assert_eq!(
            raw.to_constraint().unwrap_err(),
            "Unknown constraint kind: (missing)"
        );
    }

    #[test]
    fn status_codes_and_bodies() {
        let t = Instant::from_utc(2026, 2, 18, 22, 59, 58).unwrap();
        let found = Outcome::Found { timestamp: t };
        assert_eq!(found.status_code(), 200);
        assert_eq!(found.to_json(), json!({"timestamp": "2026-02-18T22:59:58.000Z"}));
        assert_eq!(Outcome::NotFound.status_code(), 404);
        assert_eq!(Outcome::NotFound.to_json(), json!({"error": MSG_NOT_FOUND}));
        assert_eq!(Outcome::BadRequest("x".into()).status_code(), 400);
        assert_eq!(Outcome::Internal("boom".into()).to_json(), json!({"error": "boom"}));
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let oracle = |_: Body, _: Instant| -> Result<f64, kala_core::OracleError> { Ok(0.0) };
        let out = handle_find_event_json(&oracle, "{not json", &SearchConfig::default());
        assert_eq!(out.status_code(), 400);
    }
}
