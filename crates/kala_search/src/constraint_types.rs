//! Types for longitude constraints.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kala_core::{Body, ZodiacSign};

/// Canonical angular relationship between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// All aspects in order of increasing angle.
pub const ALL_ASPECTS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

impl AspectKind {
    /// Target separation in degrees.
    pub const fn angle_deg(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    /// Lowercase wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Opposition => "opposition",
        }
    }

    pub const fn all() -> &'static [AspectKind; 5] {
        &ALL_ASPECTS
    }
}

impl Display for AspectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an aspect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAspect(pub String);

impl Display for UnknownAspect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown aspect: {:?}", self.0)
    }
}

impl std::error::Error for UnknownAspect {}

impl FromStr for AspectKind {
    type Err = UnknownAspect;

    /// Case-insensitive; the wire format itself is lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ASPECTS
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAspect(s.to_string()))
    }
}

/// One predicate over body longitudes at an instant.
///
/// A search looks for an instant at which every constraint of a set holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Separation of `body_a` and `body_b` matches `aspect` within `orb` degrees.
    Aspect {
        body_a: Body,
        body_b: Body,
        aspect: AspectKind,
        orb: f64,
    },
    /// `body` lies in `sign`.
    InSign { body: Body, sign: ZodiacSign },
    /// `body` lies within `orb` degrees of `degree` on the circle.
    AtDegree { body: Body, degree: f64, orb: f64 },
}

impl Constraint {
    pub const fn aspect(body_a: Body, body_b: Body, aspect: AspectKind, orb: f64) -> Self {
        Self::Aspect {
            body_a,
            body_b,
            aspect,
            orb,
        }
    }

    pub const fn in_sign(body: Body, sign: ZodiacSign) -> Self {
        Self::InSign { body, sign }
    }

    pub const fn at_degree(body: Body, degree: f64, orb: f64) -> Self {
        Self::AtDegree { body, degree, orb }
    }

    /// Wire label of the constraint kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Aspect { .. } => "aspect",
            Self::InSign { .. } => "in_sign",
            Self::AtDegree { .. } => "at_degree",
        }
    }

    /// Validate numeric fields.
    pub fn validate(&self) -> Result<(), &'static str> {
        match *self {
            Self::Aspect { orb, .. } => validate_orb(orb),
            Self::InSign { .. } => Ok(()),
            Self::AtDegree { degree, orb, .. } => {
                if !degree.is_finite() || !(0.0..360.0).contains(&degree) {
                    return Err("degree must be in [0, 360)");
                }
                validate_orb(orb)
            }
        }
    }
}

fn validate_orb(orb: f64) -> Result<(), &'static str> {
    if !orb.is_finite() || orb < 0.0 {
        return Err("orb must be a finite non-negative number");
    }
    Ok(())
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aspect {
                body_a,
                body_b,
                aspect,
                orb,
            } => write!(f, "{body_a} {aspect} {body_b} (orb {orb}°)"),
            Self::InSign { body, sign } => write!(f, "{body} in {sign}"),
            Self::AtDegree { body, degree, orb } => {
                write!(f, "{body} at {degree}° (orb {orb}°)")
            }
        }
    }
}
