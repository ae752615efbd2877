//! Temporal constraint search over ecliptic longitudes.
//!
//! This crate provides:
//! - Aspect, in-sign and at-degree constraints, evaluated through any
//!   [`LongitudeOracle`](kala_core::LongitudeOracle)
//! - A coarse-scan + bisection + boundary-scan solver for the nearest instant
//!   (future or past) at which a whole constraint set holds
//! - Single-body and whole-sky position lookups
//! - The JSON request boundary: validation, outcome and status mapping

pub mod constraint_types;
pub mod constraints;
pub mod error;
pub mod request;
pub mod search_types;
pub mod sky;
pub mod solver;

pub use constraint_types::{ALL_ASPECTS, AspectKind, Constraint, UnknownAspect};
pub use constraints::{aspect_error, evaluate, evaluate_all};
pub use error::SearchError;
pub use request::{
    FindEventQuery, FindEventRequest, Outcome, RawConstraint, handle_find_event,
    handle_find_event_json,
};
pub use search_types::{SearchConfig, SearchDirection, SearchReport, SearchStats};
pub use sky::{PlanetPosition, SkySnapshot, planet_position, sky_at};
pub use solver::{find_event, find_event_with_stats};
