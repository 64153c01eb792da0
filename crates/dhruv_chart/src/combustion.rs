//! Combustion (Asta/Moudhya) detection and graded combustion factor.
//!
//! A graha is combust when it is too close to the Sun, with thresholds
//! varying by planet and retrograde status per BPHS. The graded factor
//! weakens a yoga progressively as the graha approaches the Sun.
//!
//! Clean-room implementation from BPHS combustion thresholds.

use crate::chart::{ChartContext, PlanetPosition};
use crate::graha::Graha;
use crate::util::angular_separation;

/// Separation at or below which combustion is treated as total.
pub const DEEP_COMBUSTION_DEG: f64 = 3.0;
/// Factor applied at total combustion.
pub const DEEP_COMBUSTION_FACTOR: f64 = 0.2;

/// BPHS combustion threshold (degrees from Sun) for a graha.
///
/// Returns `None` for Sun, Rahu, and Ketu (not applicable).
/// For Mercury and Venus, retrograde thresholds are tighter.
pub fn combustion_threshold(graha: Graha, is_retrograde: bool) -> Option<f64> {
    match graha {
        Graha::Surya | Graha::Rahu | Graha::Ketu => None,
        Graha::Chandra => Some(12.0),
        Graha::Mangal => Some(17.0),
        Graha::Buddh => {
            if is_retrograde {
                Some(12.0)
            } else {
                Some(14.0)
            }
        }
        Graha::Guru => Some(11.0),
        Graha::Shukra => {
            if is_retrograde {
                Some(8.0)
            } else {
                Some(10.0)
            }
        }
        Graha::Shani => Some(15.0),
    }
}

/// Check if a single graha is combust (strictly inside its threshold).
///
/// Returns `false` for Sun, Rahu, and Ketu.
pub fn is_combust(graha: Graha, graha_sid_lon: f64, sun_sid_lon: f64, is_retrograde: bool) -> bool {
    match combustion_threshold(graha, is_retrograde) {
        Some(t) => angular_separation(graha_sid_lon, sun_sid_lon) < t,
        None => false,
    }
}

/// Graded combustion factor in [0.2, 1.0].
///
/// - 1.0 at or beyond the threshold (and always for Sun/Rahu/Ketu)
/// - 0.2 within 3 deg of the Sun
/// - otherwise `1 - 0.6 * (1 - d / threshold)`
pub fn combustion_factor(
    graha: Graha,
    graha_sid_lon: f64,
    sun_sid_lon: f64,
    is_retrograde: bool,
) -> f64 {
    let threshold = match combustion_threshold(graha, is_retrograde) {
        Some(t) => t,
        None => return 1.0,
    };
    let d = angular_separation(graha_sid_lon, sun_sid_lon);
    if d >= threshold {
        1.0
    } else if d <= DEEP_COMBUSTION_DEG {
        DEEP_COMBUSTION_FACTOR
    } else {
        1.0 - 0.6 * (1.0 - d / threshold)
    }
}

/// Combustion factor of a position within a chart.
pub fn position_combustion_factor(pos: &PlanetPosition, chart: &ChartContext) -> f64 {
    combustion_factor(
        pos.graha,
        pos.longitude,
        chart.position(Graha::Surya).longitude,
        pos.is_retrograde,
    )
}
