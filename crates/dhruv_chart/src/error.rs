//! Error types for chart construction.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::graha::Graha;

/// Reasons a [`ChartContext`](crate::ChartContext) can be rejected.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// Exactly 9 planet positions are required.
    PlanetCount(usize),
    /// The same graha was supplied more than once.
    DuplicateGraha(Graha),
    /// Ascendant longitude is NaN or infinite.
    InvalidAscendant(f64),
    /// Planet longitude is NaN, infinite, or outside [0, 360).
    InvalidLongitude { graha: Graha, value: f64 },
    /// Stored sign does not match the sign of the stored longitude.
    SignMismatch { graha: Graha, expected: u8, found: u8 },
    /// House number outside 1..=12.
    InvalidHouse { graha: Graha, house: u8 },
    /// Rahu and Ketu are not 180 degrees apart.
    NodeAxis { separation: f64 },
    /// House cusp at the given index is NaN or infinite.
    InvalidCusp(usize),
    /// The lord of a house could not be resolved.
    HouseLord(u8),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlanetCount(n) => write!(f, "expected 9 planet positions, got {n}"),
            Self::DuplicateGraha(g) => write!(f, "duplicate position for {g}"),
            Self::InvalidAscendant(v) => write!(f, "invalid ascendant longitude: {v}"),
            Self::InvalidLongitude { graha, value } => {
                write!(f, "invalid longitude for {graha}: {value}")
            }
            Self::SignMismatch {
                graha,
                expected,
                found,
            } => write!(
                f,
                "sign mismatch for {graha}: longitude is in sign {expected}, position says {found}"
            ),
            Self::InvalidHouse { graha, house } => {
                write!(f, "house {house} for {graha} is outside 1..=12")
            }
            Self::NodeAxis { separation } => write!(
                f,
                "Rahu and Ketu must be 180 deg apart, found {separation:.4} deg"
            ),
            Self::InvalidCusp(i) => write!(f, "house cusp {} is not finite", i + 1),
            Self::HouseLord(h) => write!(f, "could not resolve lord of house {h}"),
        }
    }
}

impl Error for ChartError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_details() {
        let e = ChartError::InvalidHouse {
            graha: Graha::Guru,
            house: 13,
        };
        assert_eq!(e.to_string(), "house 13 for Jupiter is outside 1..=12");
        assert_eq!(
            ChartError::PlanetCount(8).to_string(),
            "expected 9 planet positions, got 8"
        );
    }
}
