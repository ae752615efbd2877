//! Event solver: earliest (or latest) instant at which a constraint set holds.
//!
//! Three phases, each bounded:
//!
//! 1. **Coarse scan**: probe the start instant, then every `coarse_step`
//!    in the search direction, until the set holds or the probe cap is hit.
//! 2. **Bisection**: bracket the coarse hit by `fine_window` on both sides and
//!    halve on integer milliseconds toward the side facing the start. Every
//!    true midpoint becomes the candidate.
//! 3. **Boundary scan**: probe the candidate and two `precision` steps on
//!    each side; report the earliest (Future) or latest (Past) true probe.
//!
//! Bisection assumes the predicate flips at most once inside the bracket.
//! When it flips several times (a fast Moon aspect inside a slow sign window,
//! say) the result is some true instant of the bracket, not necessarily the
//! first. A coarse hit whose bracket never yields a true midpoint or boundary
//! probe is reported as not found.

use kala_core::{Instant, LongitudeOracle};
use kala_time::{Duration, TimeError};
use tracing::{debug, warn};

use crate::constraint_types::Constraint;
use crate::constraints::evaluate_all;
use crate::error::SearchError;
use crate::search_types::{SearchConfig, SearchDirection, SearchReport, SearchStats};

/// Boundary probes on each side of the bisection candidate.
const BOUNDARY_HALF_SPAN: i32 = 2;

/// Find the nearest instant in `direction` from `start` at which every
/// constraint holds.
///
/// Returns `Ok(None)` when the search range is exhausted. Configuration and
/// constraints are validated before the oracle is called; oracle failures
/// abort the search.
pub fn find_event<O>(
    oracle: &O,
    constraints: &[Constraint],
    direction: SearchDirection,
    start: Instant,
    config: &SearchConfig,
) -> Result<Option<Instant>, SearchError>
where
    O: LongitudeOracle + ?Sized,
{
    find_event_with_stats(oracle, constraints, direction, start, config).map(|r| r.event)
}

/// [`find_event`], also reporting how many evaluations each phase spent.
pub fn find_event_with_stats<O>(
    oracle: &O,
    constraints: &[Constraint],
    direction: SearchDirection,
    start: Instant,
    config: &SearchConfig,
) -> Result<SearchReport, SearchError>
where
    O: LongitudeOracle + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_constraints(constraints)?;

    let mut probe = Probe {
        oracle,
        constraints,
        stats: SearchStats::default(),
    };

    let event = match coarse_scan(&mut probe, direction, start, config)? {
        None => {
            debug!(
                %start,
                %direction,
                probes = probe.stats.coarse_probes,
                "coarse scan exhausted"
            );
            None
        }
        Some(hit) => {
            debug!(%hit, probes = probe.stats.coarse_probes, "coarse scan hit");
            match bisect(&mut probe, direction, hit, config)? {
                None => {
                    warn!(%hit, %direction, "coarse hit not confirmed by bisection");
                    None
                }
                Some(candidate) => {
                    debug!(%candidate, steps = probe.stats.bisection_steps, "bisection converged");
                    let event = boundary_scan(&mut probe, direction, candidate, config)?;
                    if event.is_none() {
                        warn!(%candidate, "no true instant in boundary scan");
                    }
                    event
                }
            }
        }
    };

    Ok(SearchReport {
        event,
        stats: probe.stats,
    })
}

/// Check every constraint's numeric fields, reporting the first offender.
fn validate_constraints(constraints: &[Constraint]) -> Result<(), SearchError> {
    for (index, c) in constraints.iter().enumerate() {
        c.validate()
            .map_err(|reason| SearchError::InvalidConstraint { index, reason })?;
    }
    Ok(())
}

/// Evaluates the constraint set and counts evaluations.
struct Probe<'a, O: ?Sized> {
    oracle: &'a O,
    constraints: &'a [Constraint],
    stats: SearchStats,
}

impl<O: LongitudeOracle + ?Sized> Probe<'_, O> {
    fn holds(&mut self, at: Instant) -> Result<bool, SearchError> {
        self.stats.evaluations += 1;
        evaluate_all(self.oracle, at, self.constraints)
    }
}

// ---------------------------------------------------------------------------
// Phase 1: coarse scan
// ---------------------------------------------------------------------------

fn coarse_scan<O: LongitudeOracle + ?Sized>(
    probe: &mut Probe<'_, O>,
    direction: SearchDirection,
    start: Instant,
    config: &SearchConfig,
) -> Result<Option<Instant>, SearchError> {
    let step = direction.signed(config.coarse_step);
    let mut t = start;

    for i in 0..config.max_coarse_steps {
        if i > 0 {
            t = t.checked_add(step)?;
        }
        probe.stats.coarse_probes += 1;
        if probe.holds(t)? {
            return Ok(Some(t));
        }
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// Phase 2: bisection
// ---------------------------------------------------------------------------

fn bisect<O: LongitudeOracle + ?Sized>(
    probe: &mut Probe<'_, O>,
    direction: SearchDirection,
    hit: Instant,
    config: &SearchConfig,
) -> Result<Option<Instant>, SearchError> {
    let mut low = hit.checked_sub(config.fine_window)?;
    let mut high = hit.checked_add(config.fine_window)?;
    let mut candidate = None;

    while high.since(low) > config.precision
        && probe.stats.bisection_steps < config.max_bisection_steps
    {
        let mid = low.midpoint(high);
        probe.stats.bisection_steps += 1;

        if probe.holds(mid)? {
            candidate = Some(mid);
            match direction {
                SearchDirection::Future => high = mid,
                SearchDirection::Past => low = mid,
            }
        } else {
            match direction {
                SearchDirection::Future => low = mid,
                SearchDirection::Past => high = mid,
            }
        }
    }
    Ok(candidate)
}

// ---------------------------------------------------------------------------
// Phase 3: boundary scan
// ---------------------------------------------------------------------------

fn boundary_scan<O: LongitudeOracle + ?Sized>(
    probe: &mut Probe<'_, O>,
    direction: SearchDirection,
    candidate: Instant,
    config: &SearchConfig,
) -> Result<Option<Instant>, SearchError> {
    let mut best = None;

    // Ascending time order: the first true probe is the earliest.
    for k in -BOUNDARY_HALF_SPAN..=BOUNDARY_HALF_SPAN {
        let offset: Duration = config
            .precision
            .checked_mul(k)
            .ok_or(TimeError::OutOfRange)?;
        let t = candidate.checked_add(offset)?;
        probe.stats.boundary_probes += 1;

        if probe.holds(t)? {
            best = match direction {
                SearchDirection::Future => best.or(Some(t)),
                SearchDirection::Past => Some(t),
            };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint_types::AspectKind;
    use kala_core::{Body, OracleError, ZodiacSign};

    /// Sun moving 1 deg/day from 0 deg at the Unix epoch, Moon 13 deg/day.
    fn linear(body: Body, at: Instant) -> Result<f64, OracleError> {
        let days = at.unix_ms() as f64 / 86_400_000.0;
        match body {
            Body::Sun => Ok(kala_core::normalize_degree(days)),
            Body::Moon => Ok(kala_core::normalize_degree(13.0 * days)),
            other => Err(OracleError::UnsupportedBody(other)),
        }
    }

    fn epoch_plus_days(d: i64) -> Instant {
        Instant::from_unix_ms(d * 86_400_000).unwrap()
    }

    #[test]
    fn start_instant_is_first_probe() {
        let start = epoch_plus_days(40);
        let c = [Constraint::in_sign(Body::Sun, ZodiacSign::Taurus)];
        let report = find_event_with_stats(
            &linear,
            &c,
            SearchDirection::Future,
            start,
            &SearchConfig::default(),
        )
        .unwrap();
        assert_eq!(report.stats.coarse_probes, 1);
        // Already inside Taurus: the whole bracket is true, so the result
        // sits before the start, within the fine window.
        let event = report.event.unwrap();
        assert!(event <= start);
        assert!(start.since(event) <= Duration::hours(1) + Duration::seconds(2));
    }

    #[test]
    fn finds_sign_ingress_to_the_second() {
        // Sun enters Taurus (30 deg) at exactly day 30.
        let start = epoch_plus_days(1);
        let c = [Constraint::in_sign(Body::Sun, ZodiacSign::Taurus)];
        let found = find_event(
            &linear,
            &c,
            SearchDirection::Future,
            start,
            &SearchConfig::default(),
        )
        .unwrap()
        .unwrap();
        let ingress = epoch_plus_days(30);
        assert!(found >= ingress);
        assert!(found.since(ingress) <= Duration::seconds(1));
    }

    #[test]
    fn finds_sign_egress_in_the_past() {
        // Sun leaves Taurus at day 60. Starting half an hour before a whole
        // day puts the coarse hit 30 min before egress, inside the bracket.
        let start = epoch_plus_days(100)
            .checked_sub(Duration::minutes(30))
            .unwrap();
        let c = [Constraint::in_sign(Body::Sun, ZodiacSign::Taurus)];
        let found = find_event(
            &linear,
            &c,
            SearchDirection::Past,
            start,
            &SearchConfig::default(),
        )
        .unwrap()
        .unwrap();
        let egress = epoch_plus_days(60);
        assert!(found < egress);
        assert!(egress.since(found) <= Duration::seconds(1));
    }

    #[test]
    fn exhaustion_is_not_found() {
        let config = SearchConfig {
            max_coarse_steps: 10,
            ..SearchConfig::default()
        };
        let c = [Constraint::in_sign(Body::Sun, ZodiacSign::Leo)];
        let report =
            find_event_with_stats(&linear, &c, SearchDirection::Future, epoch_plus_days(0), &config)
                .unwrap();
        assert_eq!(report.event, None);
        assert_eq!(report.stats.coarse_probes, 10);
        assert_eq!(report.stats.bisection_steps, 0);
    }

    #[test]
    fn unsupported_body_is_error() {
        let c = [Constraint::aspect(Body::Sun, Body::Ceres, AspectKind::Conjunction, 5.0)];
        let err = find_event(
            &linear,
            &c,
            SearchDirection::Future,
            epoch_plus_days(0),
            &SearchConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Oracle {
                body: Body::Ceres,
                ..
            }
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SearchConfig {
            max_bisection_steps: 0,
            ..SearchConfig::default()
        };
        let err = find_event(&linear, &[], SearchDirection::Future, epoch_plus_days(0), &config)
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidConfig("max_bisection_steps must be > 0"));
    }

    #[test]
    fn sub_millisecond_step_is_config_error_not_exhaustion() {
        let config = SearchConfig {
            coarse_step: Duration::microseconds(999),
            max_coarse_steps: 5,
            ..SearchConfig::default()
        };
        let c = [Constraint::in_sign(Body::Sun, ZodiacSign::Leo)];
        let err = find_event_with_stats(
            &linear,
            &c,
            SearchDirection::Future,
            epoch_plus_days(0),
            &config,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::InvalidConfig("coarse_step must be at least 1 ms"));
    }

    #[test]
    fn invalid_constraint_reports_index() {
        let c = [
            Constraint::in_sign(Body::Sun, ZodiacSign::Leo),
            Constraint::at_degree(Body::Sun, 400.0, 1.0),
        ];
        let err = find_event(
            &linear,
            &c,
            SearchDirection::Future,
            epoch_plus_days(0),
            &SearchConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::InvalidConstraint { index: 1, .. }));
    }

    #[test]
    fn empty_set_holds_at_start_window() {
        let start = epoch_plus_days(5);
        let report = find_event_with_stats(
            &linear,
            &[],
            SearchDirection::Future,
            start,
            &SearchConfig::default(),
        )
        .unwrap();
        // Always true: bisection runs to the low end of the bracket.
        let event = report.event.unwrap();
        assert!(event < start);
        assert_eq!(report.stats.boundary_probes, 5);
    }
}
