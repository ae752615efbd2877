//! Core vocabulary for longitude-constraint searches.
//!
//! This crate provides:
//! - [`Body`], the closed set of tracked bodies
//! - [`ZodiacSign`] and [`SignPosition`] (12 signs of 30 degrees)
//! - Circular angle arithmetic ([`normalize_degree`], [`angular_difference`])
//! - The [`LongitudeOracle`] trait consumed by the search engine

pub mod angle;
pub mod body;
pub mod error;
pub mod oracle;
pub mod zodiac;

pub use angle::{angular_difference, circular_distance, normalize_degree};
pub use body::{ALL_BODIES, Body, UnknownBody};
pub use error::OracleError;
pub use oracle::LongitudeOracle;
pub use zodiac::{ALL_SIGNS, SIGN_SPAN_DEG, SignPosition, UnknownSign, ZodiacSign};

// Re-export the time type so oracle implementors need only this crate.
pub use kala_time::Instant;
