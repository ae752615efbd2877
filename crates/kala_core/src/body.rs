//! Celestial bodies tracked by ecliptic longitude.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bodies a longitude oracle may be asked about.
///
/// Includes computed points (the lunar nodes) alongside physical bodies.
/// Whether a given oracle supports each one is up to the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// Ascending lunar node.
    NorthNode,
    /// Descending lunar node, always opposite the north node.
    SouthNode,
    Chiron,
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

/// All bodies in canonical order.
pub const ALL_BODIES: [Body; 17] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::NorthNode,
    Body::SouthNode,
    Body::Chiron,
    Body::Ceres,
    Body::Pallas,
    Body::Juno,
    Body::Vesta,
];

impl Body {
    /// Canonical name, as used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::NorthNode => "NorthNode",
            Self::SouthNode => "SouthNode",
            Self::Chiron => "Chiron",
            Self::Ceres => "Ceres",
            Self::Pallas => "Pallas",
            Self::Juno => "Juno",
            Self::Vesta => "Vesta",
        }
    }

    /// All bodies in canonical order.
    pub const fn all() -> &'static [Body; 17] {
        &ALL_BODIES
    }

    /// Case-insensitive lookup by name.
    ///
    /// Accepts the canonical names plus `north_node`/`south_node`,
    /// `mean_node`, and the Rahu/Ketu aliases for the nodes.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let body = match key.as_str() {
            "sun" => Self::Sun,
            "moon" => Self::Moon,
            "mercury" => Self::Mercury,
            "venus" => Self::Venus,
            "mars" => Self::Mars,
            "jupiter" => Self::Jupiter,
            "saturn" => Self::Saturn,
            "uranus" => Self::Uranus,
            "neptune" => Self::Neptune,
            "pluto" => Self::Pluto,
            "northnode" | "meannode" | "rahu" => Self::NorthNode,
            "southnode" | "ketu" => Self::SouthNode,
            "chiron" => Self::Chiron,
            "ceres" => Self::Ceres,
            "pallas" => Self::Pallas,
            "juno" => Self::Juno,
            "vesta" => Self::Vesta,
            _ => return None,
        };
        Some(body)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a body name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBody(pub String);

impl Display for UnknownBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown body: {:?}", self.0)
    }
}

impl std::error::Error for UnknownBody {}

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownBody(s.to_string()))
    }
}
