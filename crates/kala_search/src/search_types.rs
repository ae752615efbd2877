//! Types for event search: direction, configuration and statistics.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kala_core::Instant;
use kala_time::Duration;

/// Which way in time to search from the start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    /// Earliest qualifying instant at or after the start.
    Future,
    /// Latest qualifying instant at or before the start.
    Past,
}

impl SearchDirection {
    /// Lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Future => "future",
            Self::Past => "past",
        }
    }

    /// Apply the direction's sign to a positive step.
    pub(crate) fn signed(self, step: Duration) -> Duration {
        match self {
            Self::Future => step,
            Self::Past => -step,
        }
    }
}

impl Display for SearchDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "future" | "forward" | "next" => Ok(Self::Future),
            "past" | "backward" | "prev" => Ok(Self::Past),
            _ => Err(format!("unknown direction: {s:?} (expected future or past)")),
        }
    }
}

/// Configuration for the three-phase event search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Spacing of coarse probes (default 1 day).
    pub coarse_step: Duration,
    /// Half-width of the bisection bracket around a coarse hit (default 1 hour).
    pub fine_window: Duration,
    /// Bisection stops once the bracket is this narrow; also the spacing of
    /// boundary probes (default 1 second).
    pub precision: Duration,
    /// Coarse probe cap, start instant included (default 3650).
    pub max_coarse_steps: u32,
    /// Bisection iteration cap (default 100).
    pub max_bisection_steps: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            coarse_step: Duration::days(1),
            fine_window: Duration::hours(1),
            precision: Duration::seconds(1),
            max_coarse_steps: 3650,
            max_bisection_steps: 100,
        }
    }
}

impl SearchConfig {
    /// Minute-level precision over a one-year horizon, for interactive use.
    pub fn fast() -> Self {
        Self {
            precision: Duration::minutes(1),
            max_coarse_steps: 366,
            ..Self::default()
        }
    }

    /// Worst-case number of constraint-set evaluations for one search.
    pub fn max_evaluations(&self) -> u64 {
        u64::from(self.max_coarse_steps) + u64::from(self.max_bisection_steps) + 5
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        // Instants step in whole milliseconds; a shorter step never moves.
        if self.coarse_step < Duration::milliseconds(1) {
            return Err("coarse_step must be at least 1 ms");
        }
        if self.fine_window <= Duration::zero() {
            return Err("fine_window must be positive");
        }
        if self.precision < Duration::milliseconds(1) {
            return Err("precision must be at least 1 ms");
        }
        if self.precision > self.fine_window {
            return Err("precision must not exceed fine_window");
        }
        if self.max_coarse_steps == 0 {
            return Err("max_coarse_steps must be > 0");
        }
        if self.max_bisection_steps == 0 {
            return Err("max_bisection_steps must be > 0");
        }
        Ok(())
    }
}

/// Work done by one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Coarse-scan probes evaluated.
    pub coarse_probes: u32,
    /// Bisection midpoints evaluated.
    pub bisection_steps: u32,
    /// Boundary-scan probes evaluated.
    pub boundary_probes: u32,
    /// Total constraint-set evaluations (sum of the above).
    pub evaluations: u64,
}

/// Result of a search together with its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// The qualifying instant, or `None` when the search was exhausted.
    pub event: Option<Instant>,
    pub stats: SearchStats,
}
