//! Chandra yogas: patterns formed around the Moon.

use dhruv_chart::{
    ChartContext, Graha, PlanetPosition, TARA_GRAHAS, is_exalted, is_kendra, is_own_sign,
};

use crate::config::YogaConfig;
use crate::strength::{moon_phase_strength, score};
use crate::types::{Yoga, YogaCategory};

/// Benefics that form Adhi yoga from the Moon.
const ADHI_GRAHAS: [Graha; 3] = [Graha::Buddh, Graha::Guru, Graha::Shukra];

pub fn detect(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas: Vec<Yoga> = flanking(chart, config).into_iter().collect();
    yogas.extend(gaja_kesari(chart, config));
    yogas.extend(adhi(chart, config));
    yogas
}

/// Tara grahas at a given sign distance from `reference`.
pub(crate) fn tara_at_distance_from(
    chart: &ChartContext,
    reference: Graha,
    distance: u8,
) -> Vec<&PlanetPosition> {
    chart
        .at_distance_from(reference, distance)
        .filter(|p| TARA_GRAHAS.contains(&p.graha))
        .collect()
}

fn build(
    chart: &ChartContext,
    config: &YogaConfig,
    name: &str,
    flankers: &[&PlanetPosition],
    multiplier: f64,
) -> Yoga {
    let grahas: Vec<Graha> = flankers.iter().map(|p| p.graha).collect();
    let mut houses: Vec<u8> = flankers.iter().map(|p| p.house).collect();
    houses.dedup();
    let mut scored = grahas.clone();
    scored.push(Graha::Chandra);
    let s = score(chart, &scored, multiplier, config.node_aspects);
    Yoga::new(
        YogaCategory::Chandra,
        name,
        grahas,
        houses,
        true,
        s.strength,
        s.reasons,
    )
}

// ---------------------------------------------------------------------------
// Sunafa, Anafa, Durudhara
// ---------------------------------------------------------------------------

fn flanking(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let second = tara_at_distance_from(chart, Graha::Chandra, 2);
    let twelfth = tara_at_distance_from(chart, Graha::Chandra, 12);
    match (second.is_empty(), twelfth.is_empty()) {
        (false, true) => Some(build(chart, config, "Sunafa Yoga", &second, 1.0)),
        (true, false) => Some(build(chart, config, "Anafa Yoga", &twelfth, 1.0)),
        (false, false) => {
            let both: Vec<&PlanetPosition> = second.into_iter().chain(twelfth).collect();
            Some(build(chart, config, "Durudhara Yoga", &both, 1.2))
        }
        (true, true) => None,
    }
}

// ---------------------------------------------------------------------------
// Gaja-Kesari
// ---------------------------------------------------------------------------

fn gaja_kesari(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    if !is_kendra(chart.distance_between(Graha::Chandra, Graha::Guru)) {
        return None;
    }
    let jup = chart.position(Graha::Guru);
    let mut multiplier = 1.0;
    if is_exalted(jup.graha, jup.rashi_index) || is_own_sign(jup.graha, jup.rashi_index) {
        multiplier *= 1.2;
    }
    if moon_phase_strength(chart) < 0.5 {
        multiplier *= 0.8;
    }
    let s = score(chart, &[Graha::Guru, Graha::Chandra], multiplier, config.node_aspects);
    Some(Yoga::new(
        YogaCategory::Chandra,
        "Gaja-Kesari Yoga",
        vec![Graha::Guru, Graha::Chandra],
        vec![jup.house, chart.position(Graha::Chandra).house],
        true,
        s.strength,
        s.reasons,
    ))
}

// ---------------------------------------------------------------------------
// Adhi
// ---------------------------------------------------------------------------

fn adhi(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let placed: Vec<&PlanetPosition> = ADHI_GRAHAS
        .iter()
        .map(|&g| chart.position(g))
        .filter(|p| matches!(chart.distance_between(Graha::Chandra, p.graha), 6..=8))
        .collect();
    let name = match placed.len() {
        3 => "Complete Adhi Yoga",
        2 => "Partial Adhi Yoga",
        _ => return None,
    };
    Some(build(chart, config, name, &placed, 1.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(lons: [f64; 9]) -> ChartContext {
        ChartContext::from_sidereal(5.0, lons, [1.0; 9]).unwrap()
    }

    fn names(c: &ChartContext) -> Vec<String> {
        detect(c, &YogaConfig::default())
            .iter()
            .map(|y| y.name().to_string())
            .collect()
    }

    #[test]
    fn sunafa_only_second() {
        // Moon in Mesha, Mars in Vrishabha, nothing in Meena.
        let c = chart([200.0, 10.0, 40.0, 160.0, 130.0, 250.0, 280.0, 100.0, 280.0]);
        let n = names(&c);
        assert!(n.contains(&"Sunafa Yoga".to_string()));
        assert!(!n.contains(&"Durudhara Yoga".to_string()));
    }

    #[test]
    fn sun_and_nodes_do_not_count() {
        // Sun in 2nd and Rahu in 12th from the Moon.
        let c = chart([40.0, 10.0, 160.0, 190.0, 130.0, 250.0, 280.0, 340.0, 160.0]);
        let n = names(&c);
        for flank in ["Sunafa Yoga", "Anafa Yoga", "Durudhara Yoga"] {
            assert!(!n.iter().any(|s| s == flank));
        }
    }

    #[test]
    fn durudhara_both_sides() {
        let c = chart([200.0, 10.0, 40.0, 160.0, 340.0, 250.0, 280.0, 100.0, 280.0]);
        let yogas = detect(&c, &YogaConfig::default());
        let d = yogas.iter().find(|y| y.name() == "Durudhara Yoga").unwrap();
        assert_eq!(d.grahas(), &[Graha::Mangal, Graha::Guru]);
    }

    #[test]
    fn gaja_kesari_kendra_from_moon() {
        // Moon Mesha, Jupiter Karka (4th).
        let c = chart([200.0, 10.0, 160.0, 190.0, 100.0, 250.0, 280.0, 340.0, 160.0]);
        assert!(names(&c).contains(&"Gaja-Kesari Yoga".to_string()));
        // Jupiter Simha (5th): no.
        let c = chart([200.0, 10.0, 160.0, 190.0, 130.0, 250.0, 280.0, 340.0, 160.0]);
        assert!(!names(&c).contains(&"Gaja-Kesari Yoga".to_string()));
    }

    #[test]
    fn adhi_partial_and_complete() {
        // Moon Mesha; Mercury Kanya (6), Jupiter Tula (7), Venus Vrischika (8).
        let c = chart([100.0, 10.0, 40.0, 160.0, 190.0, 220.0, 280.0, 340.0, 160.0]);
        assert!(names(&c).contains(&"Complete Adhi Yoga".to_string()));
        // Venus moved to Dhanu.
        let c = chart([100.0, 10.0, 40.0, 160.0, 190.0, 250.0, 280.0, 340.0, 160.0]);
        assert!(names(&c).contains(&"Partial Adhi Yoga".to_string()));
    }
}
