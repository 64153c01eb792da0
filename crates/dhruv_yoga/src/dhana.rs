//! Dhana (wealth) yogas.

use dhruv_chart::bhava::FAVOURABLE_HOUSES;
use dhruv_chart::graha::nth_rashi_from;
use dhruv_chart::{
    ChartContext, Graha, UPACHAYA_HOUSES, are_conjunct, is_exalted, is_kendra,
    is_natural_benefic, is_own_sign, is_upachaya, rashi_lord_by_index, sign_distance,
};

use crate::config::YogaConfig;
use crate::raja::distinct_lords;
use crate::strength::score;
use crate::types::{Yoga, YogaCategory};

/// Houses of wealth whose lords combine into Dhana yogas.
const DHANA_HOUSES: [u8; 4] = [2, 5, 9, 11];
/// Houses where the 11th lord forms Labha yoga.
const LABHA_HOUSES: [u8; 6] = [1, 2, 5, 9, 10, 11];
const WEALTH_BENEFICS: [Graha; 3] = [Graha::Guru, Graha::Shukra, Graha::Buddh];
const VASUMATHI_STRENGTH: f64 = 75.0;

pub fn detect(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = lord_conjunctions(chart, config);
    yogas.extend(lakshmi(chart, config));
    yogas.extend(kubera(chart, config));
    yogas.extend(chandra_mangala(chart, config));
    yogas.extend(labha(chart, config));
    yogas.extend(vasumathi(chart));
    yogas.extend(mahalakshmi(chart, config));
    yogas.extend(indu_lagna(chart));
    yogas
}

fn strong_venus(chart: &ChartContext) -> bool {
    let v = chart.position(Graha::Shukra);
    is_own_sign(v.graha, v.rashi_index) || is_exalted(v.graha, v.rashi_index)
}

/// Pairwise conjunctions among the distinct lords of 2, 5, 9, 11.
fn lord_conjunctions(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let lords = distinct_lords(chart, &DHANA_HOUSES);
    let mut yogas = Vec::new();
    for (i, &a) in lords.iter().enumerate() {
        for &b in &lords[i + 1..] {
            let (pa, pb) = (chart.position(a), chart.position(b));
            if !are_conjunct(pa, pb, config.conjunction_orb) {
                continue;
            }
            let s = score(chart, &[a, b], 1.0, config.node_aspects);
            yogas.push(Yoga::new(
                YogaCategory::Dhana,
                format!("{}-{} Dhana Yoga", a.english_name(), b.english_name()),
                vec![a, b],
                vec![pa.house, pb.house],
                true,
                s.strength,
                s.reasons,
            ));
        }
    }
    yogas
}

fn lakshmi(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let venus = chart.position(Graha::Shukra);
    if !(strong_venus(chart) && FAVOURABLE_HOUSES.contains(&venus.house)) {
        return None;
    }
    let s = score(chart, &[Graha::Shukra], 1.2, config.node_aspects);
    Some(Yoga::new(
        YogaCategory::Dhana,
        "Lakshmi Yoga",
        vec![Graha::Shukra],
        vec![venus.house],
        true,
        s.strength,
        s.reasons,
    ))
}

fn kubera(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let jup = chart.position(Graha::Guru);
    let merc = chart.position(Graha::Buddh);
    if jup.house != 2 || !are_conjunct(jup, merc, config.conjunction_orb) {
        return None;
    }
    let s = score(chart, &[Graha::Guru, Graha::Buddh], 1.0, config.node_aspects);
    Some(Yoga::new(
        YogaCategory::Dhana,
        "Kubera Yoga",
        vec![Graha::Guru, Graha::Buddh],
        vec![2],
        true,
        s.strength,
        s.reasons,
    ))
}

fn chandra_mangala(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let moon = chart.position(Graha::Chandra);
    let mars = chart.position(Graha::Mangal);
    if !are_conjunct(moon, mars, config.conjunction_orb) {
        return None;
    }
    let s = score(chart, &[Graha::Chandra, Graha::Mangal], 1.0, config.node_aspects);
    Some(Yoga::new(
        YogaCategory::Dhana,
        "Chandra-Mangala Yoga",
        vec![Graha::Chandra, Graha::Mangal],
        vec![moon.house],
        true,
        s.strength,
        s.reasons,
    ))
}

fn labha(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let lord = chart.lord_position(11)?;
    if !LABHA_HOUSES.contains(&lord.house) {
        return None;
    }
    let s = score(chart, &[lord.graha], 1.0, config.node_aspects);
    Some(Yoga::new(
        YogaCategory::Dhana,
        "Labha Yoga",
        vec![lord.graha],
        vec![lord.house],
        true,
        s.strength,
        s.reasons,
    ))
}

/// Jupiter, Venus and Mercury all in upachayas from Lagna or from the Moon.
fn vasumathi(chart: &ChartContext) -> Option<Yoga> {
    let moon_rashi = chart.position(Graha::Chandra).rashi_index;
    let from_lagna = WEALTH_BENEFICS
        .iter()
        .filter(|&&g| is_upachaya(chart.position(g).house))
        .count();
    let from_moon = WEALTH_BENEFICS
        .iter()
        .filter(|&&g| is_upachaya(sign_distance(moon_rashi, chart.position(g).rashi_index)))
        .count();
    if from_lagna < 3 && from_moon < 3 {
        return None;
    }
    Some(Yoga::new(
        YogaCategory::Dhana,
        "Vasumathi Yoga",
        WEALTH_BENEFICS.to_vec(),
        UPACHAYA_HOUSES.to_vec(),
        true,
        VASUMATHI_STRENGTH,
        Vec::new(),
    ))
}

fn mahalakshmi(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let lord9 = chart.lord_position(9)?;
    if !(is_kendra(lord9.house) && strong_venus(chart)) {
        return None;
    }
    let mut grahas = vec![lord9.graha];
    if lord9.graha != Graha::Shukra {
        grahas.push(Graha::Shukra);
    }
    let s = score(chart, &grahas, 1.0, config.node_aspects);
    Some(Yoga::new(
        YogaCategory::Dhana,
        "Mahalakshmi Yoga",
        grahas,
        vec![lord9.house, chart.position(Graha::Shukra).house],
        true,
        s.strength,
        s.reasons,
    ))
}

/// Rashi index of the Indu Lagna.
///
/// Kaksha values of the 9th lords from Lagna and from the Moon are summed;
/// the remainder mod 12 (0 meaning 12) is counted from the Moon's sign.
pub fn indu_lagna_rashi(chart: &ChartContext) -> Option<u8> {
    let moon_rashi = chart.position(Graha::Chandra).rashi_index;
    let lord9_lagna = chart.lord_of_house(9)?;
    let lord9_moon = rashi_lord_by_index(nth_rashi_from(moon_rashi, 9))?;
    let total = u32::from(lord9_lagna.kaksha_value()) + u32::from(lord9_moon.kaksha_value());
    let count = match (total % 12) as u8 {
        0 => 12,
        n => n,
    };
    Some(nth_rashi_from(moon_rashi, count))
}

fn indu_lagna(chart: &ChartContext) -> Option<Yoga> {
    let indu = indu_lagna_rashi(chart)?;
    let occupants: Vec<_> = chart
        .positions()
        .iter()
        .filter(|p| p.rashi_index == indu)
        .collect();
    let benefics = occupants.iter().filter(|p| is_natural_benefic(p.graha)).count();
    if benefics == 0 {
        return None;
    }
    Some(Yoga::new(
        YogaCategory::Dhana,
        "Indu Lagna Dhana Yoga",
        occupants.iter().map(|p| p.graha).collect(),
        occupants.iter().map(|p| p.house).collect(),
        true,
        (50.0 + 15.0 * benefics as f64).min(100.0),
        Vec::new(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn chart(asc: f64, lons: [f64; 9]) -> ChartContext {
        ChartContext::from_sidereal(asc, lons, [1.0; 9]).unwrap()
    }

    fn find<'a>(yogas: &'a [Yoga], name: &str) -> Option<&'a Yoga> {
        yogas.iter().find(|y| y.name() == name)
    }

    #[test]
    fn second_and_ninth_lords_conjunct() {
        // Mesha lagna: 2nd lord Venus, 9th lord Jupiter, together in Karka.
        let c = chart(5.0, [200.0, 300.0, 150.0, 220.0, 100.0, 104.0, 250.0, 20.0, 200.0]);
        let yogas = detect(&c, &YogaConfig::default());
        assert!(find(&yogas, "Venus-Jupiter Dhana Yoga").is_some());
    }

    #[test]
    fn lakshmi_needs_strong_venus_in_good_house() {
        // Venus in Tula (own) = house 7 from Mesha.
        let c = chart(5.0, [40.0, 300.0, 150.0, 70.0, 100.0, 190.0, 250.0, 20.0, 200.0]);
        assert!(find(&detect(&c, &YogaConfig::default()), "Lakshmi Yoga").is_some());
        // Venus in Mithuna: neither own nor exalted.
        let c = chart(5.0, [40.0, 300.0, 150.0, 70.0, 100.0, 70.0, 250.0, 20.0, 200.0]);
        assert!(find(&detect(&c, &YogaConfig::default()), "Lakshmi Yoga").is_none());
    }

    #[test]
    fn kubera_jupiter_second_with_mercury() {
        let c = chart(5.0, [100.0, 300.0, 150.0, 42.0, 40.0, 190.0, 250.0, 20.0, 200.0]);
        let yogas = detect(&c, &YogaConfig::default());
        let k = find(&yogas, "Kubera Yoga").unwrap();
        assert_eq!(k.houses(), &[2]);
    }

    #[test]
    fn vasumathi_from_lagna() {
        // Mesha lagna: Jupiter in Mithuna (3), Venus in Makara (10), Mercury in Kumbha (11).
        let c = chart(5.0, [280.0, 130.0, 150.0, 305.0, 70.0, 290.0, 200.0, 20.0, 200.0]);
        let yogas = detect(&c, &YogaConfig::default());
        let y = find(&yogas, "Vasumathi Yoga").unwrap();
        assert!((y.strength_percentage() - 75.0).abs() < EPS);
        assert!(!y.is_modified());
    }

    #[test]
    fn labha_eleventh_lord_placement() {
        // Mesha lagna: 11th lord Saturn in Dhanu = house 9.
        let c = chart(5.0, [40.0, 130.0, 150.0, 70.0, 100.0, 190.0, 250.0, 20.0, 200.0]);
        let yogas = detect(&c, &YogaConfig::default());
        let y = find(&yogas, "Labha Yoga").unwrap();
        assert_eq!(y.grahas(), &[Graha::Shani]);
        // Saturn in Kanya = house 6
        let c = chart(5.0, [40.0, 130.0, 150.0, 70.0, 100.0, 190.0, 160.0, 20.0, 200.0]);
        assert!(find(&detect(&c, &YogaConfig::default()), "Labha Yoga").is_none());
    }

    #[test]
    fn indu_lagna_rashi_counts_from_moon() {
        // Mesha lagna: 9th lord Jupiter (10). Moon in Mesha: 9th from Moon is Dhanu,
        // lord Jupiter (10). Sum 20 -> 8 -> 8th sign from Mesha = Vrischika (7).
        let c = chart(5.0, [40.0, 10.0, 150.0, 70.0, 100.0, 190.0, 160.0, 20.0, 200.0]);
        assert_eq!(indu_lagna_rashi(&c), Some(7));
    }

    #[test]
    fn indu_lagna_dhana_with_benefic() {
        // Same geometry, Venus placed in Vrischika.
        let c = chart(5.0, [40.0, 10.0, 150.0, 70.0, 100.0, 215.0, 160.0, 20.0, 200.0]);
        let yogas = detect(&c, &YogaConfig::default());
        let y = find(&yogas, "Indu Lagna Dhana Yoga").unwrap();
        assert!((y.strength_percentage() - 65.0).abs() < EPS);
    }
}
