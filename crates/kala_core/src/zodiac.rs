//! Zodiac signs and sign-relative positions.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Aries at 0 degrees.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degree;

/// Width of one sign in degrees.
pub const SIGN_SPAN_DEG: f64 = 30.0;

/// The 12 zodiac signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// English name of the sign.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Aries => 0,
            Self::Taurus => 1,
            Self::Gemini => 2,
            Self::Cancer => 3,
            Self::Leo => 4,
            Self::Virgo => 5,
            Self::Libra => 6,
            Self::Scorpio => 7,
            Self::Sagittarius => 8,
            Self::Capricorn => 9,
            Self::Aquarius => 10,
            Self::Pisces => 11,
        }
    }

    /// All 12 signs in order.
    pub const fn all() -> &'static [ZodiacSign; 12] {
        &ALL_SIGNS
    }

    /// Ecliptic longitude at which this sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_SPAN_DEG
    }

    /// Sign containing the given ecliptic longitude (any real value).
    pub fn from_longitude(lon_deg: f64) -> Self {
        let idx = (normalize_degree(lon_deg) / SIGN_SPAN_DEG).floor() as usize;
        ALL_SIGNS[idx.min(11)]
    }

    /// Case-insensitive lookup by English name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_SIGNS
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl Display for ZodiacSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a sign name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSign(pub String);

impl Display for UnknownSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown zodiac sign: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSign {}

impl FromStr for ZodiacSign {
    type Err = UnknownSign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownSign(s.to_string()))
    }
}

/// A longitude expressed as sign plus degrees within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignPosition {
    /// Normalized ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Sign containing the longitude.
    pub sign: ZodiacSign,
    /// Decimal degrees within the sign [0, 30).
    pub degree_in_sign: f64,
}

impl SignPosition {
    /// Decompose an ecliptic longitude.
    pub fn from_longitude(lon_deg: f64) -> Self {
        let longitude_deg = normalize_degree(lon_deg);
        let sign = ZodiacSign::from_longitude(longitude_deg);
        Self {
            longitude_deg,
            sign,
            // Division rounding can land a hair below the sign start.
            degree_in_sign: (longitude_deg - sign.start_longitude()).max(0.0),
        }
    }
}
