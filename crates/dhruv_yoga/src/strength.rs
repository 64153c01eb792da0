//! Strength modifiers and the shared cancellation pipeline.
//!
//! Every yoga's strength is built from its contributing planets:
//! a base score from dignity, house and motion, multiplied by a net
//! cancellation factor from combustion, hemming (Papakartari), malefic
//! drishti, debilitation, enemy signs and benefic drishti.
//!
//! Clean-room implementation from BPHS and Saravali strength conventions.

use dhruv_chart::bhava::{FAVOURABLE_HOUSES, is_kendra, next_house, previous_house};
use dhruv_chart::combustion::position_combustion_factor;
use dhruv_chart::dignity::{exaltation_sign, has_dig_bala, is_enemy_sign, is_friend_sign};
use dhruv_chart::graha::rashi_lord_by_index;
use dhruv_chart::util::forward_arc;
use dhruv_chart::{
    ALL_GRAHAS, ChartContext, Graha, NodeAspectPolicy, PlanetPosition, casts_drishti,
    is_debilitated, is_exalted, is_own_sign, sign_distance,
};

use crate::types::{MAX_STRENGTH, MIN_STRENGTH};

/// Starting score before per-planet adjustments.
pub const BASE_STRENGTH: f64 = 50.0;
/// Bounds of the net cancellation factor.
pub const MIN_CANCELLATION: f64 = 0.1;
pub const MAX_CANCELLATION: f64 = 1.5;
/// Flat factor for a planet hemmed between malefics.
pub const PAPAKARTARI_FACTOR: f64 = 0.7;
/// Cap on the summed malefic affliction weights.
pub const MAX_AFFLICTION: f64 = 0.6;
/// Cap on the summed benefic boost weights.
pub const MAX_BENEFIC_BOOST: f64 = 0.3;

/// Malefics that hem a house when placed on both sides of it.
pub const PAPA_GRAHAS: [Graha; 5] = [
    Graha::Shani,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Ketu,
    Graha::Surya,
];

/// Weight of each malefic's drishti.
const AFFLICTION_WEIGHTS: [(Graha, f64); 5] = [
    (Graha::Shani, 0.25),
    (Graha::Mangal, 0.20),
    (Graha::Rahu, 0.18),
    (Graha::Ketu, 0.12),
    (Graha::Surya, 0.08),
];

/// Weight of each benefic's drishti.
const BENEFIC_WEIGHTS: [(Graha, f64); 4] = [
    (Graha::Guru, 0.15),
    (Graha::Shukra, 0.10),
    (Graha::Buddh, 0.08),
    (Graha::Chandra, 0.05),
];

/// Mercury below this combustion factor counts as combust for benefic boost.
const MERCURY_COMBUST_CUTOFF: f64 = 0.6;
/// Moon below this phase fraction is too dark to lend a boost.
const MOON_BRIGHT_CUTOFF: f64 = 0.5;

// ---------------------------------------------------------------------------
// 1a. Per-planet factors
// ---------------------------------------------------------------------------

/// Does any of [`PAPA_GRAHAS`] (other than `exclude`) occupy `house`?
pub fn malefic_in_house(chart: &ChartContext, house: u8, exclude: Graha) -> bool {
    PAPA_GRAHAS
        .iter()
        .any(|&g| g != exclude && chart.position(g).house == house)
}

/// True iff malefics occupy both the house before and after the planet's house.
pub fn is_papakartari(pos: &PlanetPosition, chart: &ChartContext) -> bool {
    malefic_in_house(chart, previous_house(pos.house), pos.graha)
        && malefic_in_house(chart, next_house(pos.house), pos.graha)
}

/// `1 - min(sum of aspecting malefic weights, 0.6)`.
pub fn malefic_affliction_factor(
    pos: &PlanetPosition,
    chart: &ChartContext,
    policy: NodeAspectPolicy,
) -> f64 {
    let total: f64 = AFFLICTION_WEIGHTS
        .iter()
        .filter(|(g, _)| *g != pos.graha && casts_drishti(chart.position(*g), pos, policy))
        .map(|(_, w)| w)
        .sum();
    1.0 - total.min(MAX_AFFLICTION)
}

/// `1 + min(sum of aspecting benefic weights, 0.3)`.
///
/// Mercury only contributes when not combust, the Moon only when at least
/// half lit.
pub fn benefic_boost_factor(
    pos: &PlanetPosition,
    chart: &ChartContext,
    policy: NodeAspectPolicy,
) -> f64 {
    let total: f64 = BENEFIC_WEIGHTS
        .iter()
        .filter(|(g, _)| *g != pos.graha)
        .filter(|(g, _)| match g {
            Graha::Buddh => {
                position_combustion_factor(chart.position(Graha::Buddh), chart)
                    >= MERCURY_COMBUST_CUTOFF
            }
            Graha::Chandra => moon_phase_strength(chart) >= MOON_BRIGHT_CUTOFF,
            _ => true,
        })
        .filter(|(g, _)| casts_drishti(chart.position(*g), pos, policy))
        .map(|(_, w)| w)
        .sum();
    1.0 + total.min(MAX_BENEFIC_BOOST)
}

/// Lunar phase as a fraction: 0 at new moon, 1 at full moon.
pub fn moon_phase_strength(chart: &ChartContext) -> f64 {
    let elong = forward_arc(
        chart.position(Graha::Surya).longitude,
        chart.position(Graha::Chandra).longitude,
    );
    if elong <= 180.0 {
        elong / 180.0
    } else {
        (360.0 - elong) / 180.0
    }
}

/// Debilitation cancellation used by the strength pipeline.
///
/// Any of these, each judged from Lagna or from the Moon:
/// 1. the planet itself is in a Kendra,
/// 2. the lord of its sign is in a Kendra,
/// 3. the lord of its exaltation sign is in a Kendra,
/// 4. the planet exalted in its sign is in a Kendra.
pub fn has_neecha_bhanga(pos: &PlanetPosition, chart: &ChartContext) -> bool {
    let moon_rashi = chart.position(Graha::Chandra).rashi_index;
    let in_kendra = |p: &PlanetPosition| {
        is_kendra(p.house) || is_kendra(sign_distance(moon_rashi, p.rashi_index))
    };

    if in_kendra(pos) {
        return true;
    }
    if let Some(lord) = rashi_lord_by_index(pos.rashi_index) {
        if in_kendra(chart.position(lord)) {
            return true;
        }
    }
    if let Some(lord) = rashi_lord_by_index(exaltation_sign(pos.graha)) {
        if in_kendra(chart.position(lord)) {
            return true;
        }
    }
    ALL_GRAHAS
        .into_iter()
        .filter(|&g| !g.is_node() && g != pos.graha && exaltation_sign(g) == pos.rashi_index)
        .any(|g| in_kendra(chart.position(g)))
}

// ---------------------------------------------------------------------------
// 1b. Aggregate factors
// ---------------------------------------------------------------------------

/// Net cancellation multiplier and the reasons that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cancellation {
    /// Product of per-planet factors, clamped to [0.1, 1.5].
    pub factor: f64,
    pub reasons: Vec<String>,
}

/// Combine per-planet modifiers across all contributing planets.
pub fn cancellation(
    positions: &[&PlanetPosition],
    chart: &ChartContext,
    policy: NodeAspectPolicy,
) -> Cancellation {
    let mut factor = 1.0;
    let mut reasons = Vec::new();

    for pos in positions {
        let name = pos.graha.english_name();

        let combust = position_combustion_factor(pos, chart);
        if combust < 0.9 {
            factor *= combust;
            if combust < 0.5 {
                reasons.push(format!("{name} is deeply combust"));
            } else if combust < 0.8 {
                reasons.push(format!("{name} is combust"));
            }
        }

        if is_papakartari(pos, chart) {
            factor *= PAPAKARTARI_FACTOR;
            reasons.push(format!("{name} hemmed between malefics"));
        }

        let affliction = malefic_affliction_factor(pos, chart, policy);
        if affliction < 0.9 {
            factor *= affliction;
            if affliction < 0.7 {
                reasons.push(format!("{name} severely afflicted by malefics"));
            }
        }

        if is_debilitated(pos.graha, pos.rashi_index) && !has_neecha_bhanga(pos, chart) {
            factor *= 0.5;
            reasons.push(format!("{name} debilitated without cancellation"));
        }

        if is_enemy_sign(pos.graha, pos.rashi_index) {
            factor *= 0.85;
            reasons.push(format!("{name} in enemy sign"));
        }

        let boost = benefic_boost_factor(pos, chart, policy);
        if boost > 1.0 {
            factor *= boost;
        }
    }

    Cancellation {
        factor: factor.clamp(MIN_CANCELLATION, MAX_CANCELLATION),
        reasons,
    }
}

/// Pre-cancellation strength of a group of planets.
pub fn base_strength(positions: &[&PlanetPosition]) -> f64 {
    let mut strength = BASE_STRENGTH;
    for pos in positions {
        let (g, r, h) = (pos.graha, pos.rashi_index, pos.house);
        if is_exalted(g, r) {
            strength += 15.0;
        }
        if is_own_sign(g, r) {
            strength += 12.0;
        }
        if is_friend_sign(g, r) {
            strength += 6.0;
        }
        if FAVOURABLE_HOUSES.contains(&h) {
            strength += 8.0;
        }
        if matches!(h, 2 | 11) {
            strength += 4.0;
        }
        if is_debilitated(g, r) {
            strength -= 15.0;
        }
        if matches!(h, 6 | 8 | 12) {
            strength -= 10.0;
        }
        if pos.is_retrograde {
            strength += match g {
                Graha::Guru | Graha::Shukra | Graha::Buddh => 5.0,
                Graha::Shani => 3.0,
                Graha::Mangal => -2.0,
                _ => 0.0,
            };
        }
        if has_dig_bala(g, h) {
            strength += 7.0;
        }
    }
    strength
}

/// Final strength plus the cancellation reasons behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    /// `clamp(base * multiplier * cancellation, 10, 100)`.
    pub strength: f64,
    pub reasons: Vec<String>,
}

/// Score a yoga formed by `grahas`, with a rule-specific multiplier.
pub fn score(
    chart: &ChartContext,
    grahas: &[Graha],
    multiplier: f64,
    policy: NodeAspectPolicy,
) -> Scored {
    let positions: Vec<&PlanetPosition> = grahas.iter().map(|&g| chart.position(g)).collect();
    let base = base_strength(&positions);
    let Cancellation { factor, reasons } = cancellation(&positions, chart, policy);
    Scored {
        strength: (base * multiplier * factor).clamp(MIN_STRENGTH, MAX_STRENGTH),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // Sun, Moon, Mars, Mercury, Jupiter, Venus, Saturn, Rahu, Ketu
    fn chart(lons: [f64; 9]) -> ChartContext {
        ChartContext::from_sidereal(0.0, lons, [1.0; 9]).unwrap()
    }

    #[test]
    fn moon_phase_extremes() {
        let new_moon = chart([100.0, 100.0, 200.0, 130.0, 250.0, 70.0, 300.0, 20.0, 200.0]);
        assert!(moon_phase_strength(&new_moon).abs() < EPS);
        let full = chart([100.0, 280.0, 200.0, 130.0, 250.0, 70.0, 300.0, 20.0, 200.0]);
        assert!((moon_phase_strength(&full) - 1.0).abs() < EPS);
        let quarter = chart([100.0, 10.0, 200.0, 130.0, 250.0, 70.0, 300.0, 20.0, 200.0]);
        assert!((moon_phase_strength(&quarter) - 0.5).abs() < EPS);
    }

    #[test]
    fn papakartari_needs_both_sides() {
        // Jupiter in house 5 (Simha), Mars in 4, Saturn in 6
        let c = chart([10.0, 200.0, 100.0, 40.0, 130.0, 70.0, 160.0, 250.0, 70.0]);
        assert!(is_papakartari(c.position(Graha::Guru), &c));
        // Move Saturn away
        let c = chart([10.0, 200.0, 100.0, 40.0, 130.0, 70.0, 220.0, 250.0, 70.0]);
        assert!(!is_papakartari(c.position(Graha::Guru), &c));
    }

    #[test]
    fn affliction_sums_and_caps() {
        // Target Venus in Mesha (0). Saturn in Tula (7th), Mars in Tula (7th),
        // Rahu in Simha (5th -> Rahu's 9th aspect onto Mesha), Sun in Tula.
        let c = chart([190.0, 40.0, 200.0, 160.0, 100.0, 10.0, 195.0, 130.0, 310.0]);
        let f = malefic_affliction_factor(c.position(Graha::Shukra), &c, NodeAspectPolicy::JupiterLike);
        // 0.25 + 0.20 + 0.18 + 0.08 = 0.71 -> capped at 0.6
        assert!((f - 0.4).abs() < EPS);
        let f = malefic_affliction_factor(c.position(Graha::Shukra), &c, NodeAspectPolicy::None);
        // without Rahu: 0.53
        assert!((f - 0.47).abs() < EPS);
    }

    #[test]
    fn benefic_boost_skips_dark_moon_and_combust_mercury() {
        // Target Saturn in Tula (6). Jupiter in Mesha (7th onto Tula).
        // Mercury in Mesha conjunct Sun (combust), Moon in Mesha near Sun (dark).
        let c = chart([5.0, 8.0, 100.0, 6.0, 20.0, 70.0, 190.0, 250.0, 70.0]);
        let f = benefic_boost_factor(c.position(Graha::Shani), &c, NodeAspectPolicy::JupiterLike);
        assert!((f - 1.15).abs() < EPS);
    }

    #[test]
    fn benefic_boost_caps_at_point_three() {
        // Target Saturn in Tula; Jupiter, Venus, Mercury, bright Moon all in Mesha.
        // Sun far away in Makara keeps Mercury uncombust; Moon elongation 100.
        let c = chart([280.0, 20.0, 100.0, 10.0, 15.0, 25.0, 190.0, 250.0, 70.0]);
        let f = benefic_boost_factor(c.position(Graha::Shani), &c, NodeAspectPolicy::JupiterLike);
        // 0.15 + 0.10 + 0.08 + 0.05 = 0.38 -> 0.3
        assert!((f - 1.3).abs() < EPS);
    }

    #[test]
    fn base_strength_exalted_jupiter_in_lagna() {
        // Asc Karka; Jupiter at 95 (Karka) in house 1: +15 exalted, +6 Moon's sign,
        // +8 kendra, +7 dig bala
        let c = ChartContext::from_sidereal(
            92.0,
            [10.0, 200.0, 160.0, 40.0, 95.0, 70.0, 250.0, 130.0, 310.0],
            [1.0; 9],
        )
        .unwrap();
        let b = base_strength(&[c.position(Graha::Guru)]);
        assert!((b - 86.0).abs() < EPS);
    }

    #[test]
    fn base_strength_debilitated_in_dusthana() {
        // Asc Mesha; Jupiter at 280 (Makara) in house 10 -> debilitated, kendra,
        // Makara lord Saturn is neutral to Jupiter: 50 - 15 + 8 = 43
        let c = chart([10.0, 200.0, 160.0, 40.0, 280.0, 70.0, 250.0, 130.0, 310.0]);
        let b = base_strength(&[c.position(Graha::Guru)]);
        assert!((b - 43.0).abs() < EPS);
    }

    #[test]
    fn retrograde_adjustments() {
        let mut speeds = [1.0; 9];
        speeds[Graha::Mangal.index() as usize] = -0.2;
        speeds[Graha::Shani.index() as usize] = -0.05;
        let c = ChartContext::from_sidereal(
            0.0,
            [10.0, 200.0, 100.0, 40.0, 130.0, 70.0, 160.0, 250.0, 70.0],
            speeds,
        )
        .unwrap();
        let plain_mars = {
            let mut p = *c.position(Graha::Mangal);
            p.is_retrograde = false;
            base_strength(&[&p])
        };
        assert!((base_strength(&[c.position(Graha::Mangal)]) - (plain_mars - 2.0)).abs() < EPS);
        let plain_sat = {
            let mut p = *c.position(Graha::Shani);
            p.is_retrograde = false;
            base_strength(&[&p])
        };
        assert!((base_strength(&[c.position(Graha::Shani)]) - (plain_sat + 3.0)).abs() < EPS);
    }

    #[test]
    fn neecha_bhanga_via_kendra_from_lagna() {
        // Jupiter debilitated in Makara, house 10 from Mesha lagna
        let c = chart([10.0, 200.0, 160.0, 40.0, 280.0, 70.0, 250.0, 130.0, 310.0]);
        assert!(has_neecha_bhanga(c.position(Graha::Guru), &c));
    }

    #[test]
    fn cancellation_factor_in_range() {
        let c = chart([10.0, 12.0, 14.0, 11.0, 280.0, 13.0, 190.0, 130.0, 310.0]);
        for g in ALL_GRAHAS {
            let f = cancellation(&[c.position(g)], &c, NodeAspectPolicy::JupiterLike).factor;
            assert!((MIN_CANCELLATION..=MAX_CANCELLATION).contains(&f));
        }
    }

    #[test]
    fn deep_combustion_reason() {
        // Moon 2 deg from Sun
        let c = chart([100.0, 102.0, 200.0, 160.0, 250.0, 40.0, 300.0, 20.0, 200.0]);
        let canc = cancellation(&[c.position(Graha::Chandra)], &c, NodeAspectPolicy::JupiterLike);
        assert!(canc.reasons.iter().any(|r| r == "Moon is deeply combust"));
    }

    #[test]
    fn score_is_clamped() {
        let c = chart([100.0, 102.0, 200.0, 160.0, 250.0, 40.0, 300.0, 20.0, 200.0]);
        let s = score(&c, &[Graha::Chandra, Graha::Guru], 10.0, NodeAspectPolicy::JupiterLike);
        assert!(s.strength <= 100.0);
        let s = score(&c, &[Graha::Chandra], 0.01, NodeAspectPolicy::JupiterLike);
        assert!((s.strength - 10.0).abs() < EPS);
    }
}
