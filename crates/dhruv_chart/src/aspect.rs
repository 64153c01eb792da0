//! Conjunction and sign-based drishti (planetary aspect) geometry.
//!
//! Two query modes are provided:
//! - degree-based: conjunction within an orb, opposition within a window;
//! - house-distance drishti: every graha aspects the 7th sign from itself,
//!   Mars also the 4th/8th, Jupiter the 5th/9th, Saturn the 3rd/10th.
//!
//! Rahu/Ketu special aspects are not agreed upon across traditions, so they
//! are selected by [`NodeAspectPolicy`].
//!
//! Clean-room implementation from standard Vedic jyotish texts (BPHS).

use serde::{Deserialize, Serialize};

use crate::bhava::sign_distance;
use crate::chart::{ChartContext, PlanetPosition};
use crate::graha::{ALL_GRAHAS, Graha, rashi_lord_by_index};
use crate::util::angular_separation;

/// Default conjunction orb in degrees.
pub const CONJUNCTION_ORB: f64 = 8.0;
/// Close conjunction orb (Budha-Aditya and similar).
pub const CLOSE_ORB: f64 = 6.0;
/// "Exact" conjunction orb.
pub const EXACT_ORB: f64 = 3.0;
/// Planetary war orb.
pub const WAR_ORB: f64 = 1.0;

/// Opposition window for mutual aspect, inclusive.
pub const OPPOSITION_MIN: f64 = 170.0;
pub const OPPOSITION_MAX: f64 = 190.0;

/// Special-aspect rule applied to Rahu and Ketu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeAspectPolicy {
    /// 5th and 9th, like Jupiter.
    #[default]
    JupiterLike,
    /// 3rd and 10th, like Saturn.
    SaturnLike,
    /// 7th only.
    None,
}

/// Sign distances (besides the 7th) aspected by a graha.
pub const fn special_aspect_distances(graha: Graha, policy: NodeAspectPolicy) -> &'static [u8] {
    match graha {
        Graha::Mangal => &[4, 8],
        Graha::Guru => &[5, 9],
        Graha::Shani => &[3, 10],
        Graha::Rahu | Graha::Ketu => match policy {
            NodeAspectPolicy::JupiterLike => &[5, 9],
            NodeAspectPolicy::SaturnLike => &[3, 10],
            NodeAspectPolicy::None => &[],
        },
        _ => &[],
    }
}

/// Does a graha cast drishti onto the sign at `distance` (1..=12) from itself?
pub fn aspects_distance(graha: Graha, distance: u8, policy: NodeAspectPolicy) -> bool {
    distance == 7 || special_aspect_distances(graha, policy).contains(&distance)
}

/// Sign-based drishti from one position onto another.
pub fn casts_drishti(
    from: &PlanetPosition,
    to: &PlanetPosition,
    policy: NodeAspectPolicy,
) -> bool {
    aspects_distance(from.graha, sign_distance(from.rashi_index, to.rashi_index), policy)
}

/// Sign-based drishti from a position onto a rashi.
pub fn casts_drishti_on_rashi(
    from: &PlanetPosition,
    rashi_index: u8,
    policy: NodeAspectPolicy,
) -> bool {
    aspects_distance(from.graha, sign_distance(from.rashi_index, rashi_index), policy)
}

/// Degree-based conjunction: separation <= orb.
pub fn are_conjunct(a: &PlanetPosition, b: &PlanetPosition, orb: f64) -> bool {
    angular_separation(a.longitude, b.longitude) <= orb
}

/// Degree-based opposition: separation within [170, 190].
///
/// Separation is folded into [0, 180], so in practice this is >= 170.
pub fn are_mutually_aspecting(a: &PlanetPosition, b: &PlanetPosition) -> bool {
    let sep = angular_separation(a.longitude, b.longitude);
    (OPPOSITION_MIN..=OPPOSITION_MAX).contains(&sep)
}

/// Sign exchange (parivartana): each occupies a sign ruled by the other.
pub fn are_in_exchange(a: &PlanetPosition, b: &PlanetPosition) -> bool {
    a.graha != b.graha
        && rashi_lord_by_index(a.rashi_index) == Some(b.graha)
        && rashi_lord_by_index(b.rashi_index) == Some(a.graha)
}

/// All grahas (other than the target itself) casting drishti on `target`.
pub fn aspecting_grahas(
    chart: &ChartContext,
    target: Graha,
    policy: NodeAspectPolicy,
) -> Vec<Graha> {
    let to = chart.position(target);
    ALL_GRAHAS
        .into_iter()
        .filter(|&g| g != target && casts_drishti(chart.position(g), to, policy))
        .collect()
}

/// 9×9 sign-drishti matrix, `m[source][target]` indexed by `Graha::index()`.
pub fn drishti_matrix(chart: &ChartContext, policy: NodeAspectPolicy) -> [[bool; 9]; 9] {
    let mut m = [[false; 9]; 9];
    for src in ALL_GRAHAS {
        for dst in ALL_GRAHAS {
            if src != dst {
                m[src.index() as usize][dst.index() as usize] =
                    casts_drishti(chart.position(src), chart.position(dst), policy);
            }
        }
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(graha: Graha, lon: f64) -> PlanetPosition {
        PlanetPosition::new(graha, lon, 1, false, 1.0)
    }

    #[test]
    fn everyone_aspects_seventh() {
        for g in ALL_GRAHAS {
            assert!(aspects_distance(g, 7, NodeAspectPolicy::None));
            assert!(!aspects_distance(g, 1, NodeAspectPolicy::JupiterLike));
        }
    }

    #[test]
    fn special_aspects() {
        assert!(aspects_distance(Graha::Mangal, 4, NodeAspectPolicy::default()));
        assert!(aspects_distance(Graha::Mangal, 8, NodeAspectPolicy::default()));
        assert!(aspects_distance(Graha::Guru, 5, NodeAspectPolicy::default()));
        assert!(aspects_distance(Graha::Shani, 10, NodeAspectPolicy::default()));
        assert!(!aspects_distance(Graha::Shukra, 5, NodeAspectPolicy::default()));
    }

    #[test]
    fn node_policy_selects_rule() {
        assert!(aspects_distance(Graha::Rahu, 9, NodeAspectPolicy::JupiterLike));
        assert!(!aspects_distance(Graha::Rahu, 3, NodeAspectPolicy::JupiterLike));
        assert!(aspects_distance(Graha::Ketu, 3, NodeAspectPolicy::SaturnLike));
        assert!(!aspects_distance(Graha::Ketu, 5, NodeAspectPolicy::SaturnLike));
        assert!(!aspects_distance(Graha::Rahu, 5, NodeAspectPolicy::None));
    }

    #[test]
    fn drishti_is_directional() {
        // Jupiter in Mesha, Saturn in Simha (5th from Jupiter, 9th back)
        let jup = pos(Graha::Guru, 10.0);
        let sat = pos(Graha::Shani, 130.0);
        assert!(casts_drishti(&jup, &sat, NodeAspectPolicy::default()));
        // Saturn → Jupiter is distance 9: not a Saturn aspect
        assert!(!casts_drishti(&sat, &jup, NodeAspectPolicy::default()));
    }

    #[test]
    fn conjunction_orb_boundary() {
        let a = pos(Graha::Surya, 100.0);
        let b = pos(Graha::Buddh, 108.0);
        assert!(are_conjunct(&a, &b, CONJUNCTION_ORB));
        assert!(!are_conjunct(&a, &b, CLOSE_ORB));
    }

    #[test]
    fn conjunction_across_zero() {
        let a = pos(Graha::Surya, 358.0);
        let b = pos(Graha::Buddh, 2.0);
        assert!(are_conjunct(&a, &b, EXACT_ORB + 1.0));
    }

    #[test]
    fn mutual_aspect_window() {
        let a = pos(Graha::Guru, 10.0);
        assert!(are_mutually_aspecting(&a, &pos(Graha::Shukra, 185.0)));
        assert!(are_mutually_aspecting(&a, &pos(Graha::Shukra, 190.0)));
        assert!(!are_mutually_aspecting(&a, &pos(Graha::Shukra, 175.0)));
    }

    #[test]
    fn exchange_requires_both_directions() {
        // Mars in Kanya (Mercury), Mercury in Mesha (Mars)
        let mars = pos(Graha::Mangal, 160.0);
        let merc = pos(Graha::Buddh, 5.0);
        assert!(are_in_exchange(&mars, &merc));
        let merc_elsewhere = pos(Graha::Buddh, 40.0);
        assert!(!are_in_exchange(&mars, &merc_elsewhere));
    }
}
