//! Nabhasa yogas: distribution patterns of the seven classical planets.
//!
//! Sankhya counts occupied signs, Ashraya looks at sign modality, and the
//! Dala and Akriti groups match occupied houses against fixed templates.
//! None of these use the strength pipeline; each pattern has a fixed score.

use std::collections::BTreeSet;

use dhruv_chart::{
    ChartContext, Graha, Modality, PlanetPosition, SAPTA_GRAHAS, is_kendra,
    is_natural_benefic, is_trikona,
};

use crate::config::YogaConfig;
use crate::types::{Yoga, YogaCategory};

/// Sankhya names indexed by occupied-sign count minus one.
pub const SANKHYA_NAMES: [&str; 7] = [
    "Gola Yoga",
    "Yuga Yoga",
    "Shoola Yoga",
    "Kedara Yoga",
    "Pasha Yoga",
    "Dama Yoga",
    "Veena Yoga",
];

/// Houses in which Gola yoga is favourable.
const GOLA_GOOD_HOUSES: [u8; 6] = [1, 2, 5, 9, 10, 11];

const GADA_PAIRS: [[u8; 2]; 4] = [[1, 4], [4, 7], [7, 10], [10, 1]];

/// (name, houses, strength, auspicious) for the four-house Akriti templates.
const QUARTER_TEMPLATES: [(&str, [u8; 4], f64, bool); 4] = [
    ("Yupa Yoga", [1, 2, 3, 4], 75.0, true),
    ("Shara Yoga", [4, 5, 6, 7], 55.0, false),
    ("Shakti Yoga", [7, 8, 9, 10], 45.0, false),
    ("Danda Yoga", [10, 11, 12, 1], 50.0, false),
];

const SARPA_GRAHAS: [Graha; 3] = [Graha::Surya, Graha::Mangal, Graha::Shani];

pub fn detect(chart: &ChartContext, _config: &YogaConfig) -> Vec<Yoga> {
    let planets: Vec<&PlanetPosition> = SAPTA_GRAHAS.iter().map(|&g| chart.position(g)).collect();
    let houses: BTreeSet<u8> = planets.iter().map(|p| p.house).collect();

    let mut yogas = Vec::new();
    yogas.extend(sankhya(&planets));
    yogas.extend(ashraya(&planets));
    yogas.extend(dala(&planets, &houses));
    yogas.extend(akriti(&planets, &houses));
    yogas
}

fn fixed(
    name: &str,
    planets: &[&PlanetPosition],
    houses: Vec<u8>,
    strength: f64,
    auspicious: bool,
) -> Yoga {
    Yoga::new(
        YogaCategory::Nabhasa,
        name,
        planets.iter().map(|p| p.graha).collect(),
        houses,
        auspicious,
        strength,
        Vec::new(),
    )
}

// ---------------------------------------------------------------------------
// Sankhya
// ---------------------------------------------------------------------------

/// Exactly one Sankhya yoga, keyed by the number of distinct occupied signs.
fn sankhya(planets: &[&PlanetPosition]) -> Option<Yoga> {
    let signs: BTreeSet<u8> = planets.iter().map(|p| p.rashi_index).collect();
    let count = signs.len();
    let name = SANKHYA_NAMES.get(count.checked_sub(1)?)?;
    let houses: BTreeSet<u8> = planets.iter().map(|p| p.house).collect();
    let auspicious = count != 1 || GOLA_GOOD_HOUSES.contains(&planets[0].house);
    Some(fixed(
        name,
        planets,
        houses.into_iter().collect(),
        50.0 + (12 - count) as f64 * 3.0,
        auspicious,
    ))
}

// ---------------------------------------------------------------------------
// Ashraya
// ---------------------------------------------------------------------------

fn ashraya(planets: &[&PlanetPosition]) -> Option<Yoga> {
    let first = planets.first()?.rashi().modality();
    if !planets.iter().all(|p| p.rashi().modality() == first) {
        return None;
    }
    let name = match first {
        Modality::Movable => "Rajju Yoga",
        Modality::Fixed => "Musala Yoga",
        Modality::Dual => "Nala Yoga",
    };
    let houses: BTreeSet<u8> = planets.iter().map(|p| p.house).collect();
    Some(fixed(name, planets, houses.into_iter().collect(), 55.0, true))
}

// ---------------------------------------------------------------------------
// Dala
// ---------------------------------------------------------------------------

fn dala(planets: &[&PlanetPosition], houses: &BTreeSet<u8>) -> Vec<Yoga> {
    let occupied: Vec<u8> = houses.iter().copied().collect();
    let mut yogas = Vec::new();

    if houses.len() >= 3 && houses.iter().all(|&h| is_kendra(h)) {
        yogas.push(fixed("Kamala Yoga", planets, occupied.clone(), 90.0, true));
    }
    if houses.len() >= 5 && houses.iter().all(|&h| !is_kendra(h)) {
        yogas.push(fixed("Vapi Yoga", planets, occupied.clone(), 65.0, true));
    }
    if houses.len() >= 2 && houses.iter().all(|&h| is_trikona(h)) {
        yogas.push(fixed("Shringataka Yoga", planets, occupied, 75.0, true));
    }
    yogas
}

// ---------------------------------------------------------------------------
// Akriti
// ---------------------------------------------------------------------------

fn akriti(planets: &[&PlanetPosition], houses: &BTreeSet<u8>) -> Vec<Yoga> {
    let occupied: Vec<u8> = houses.iter().copied().collect();
    let mut yogas = Vec::new();

    if let Some(pair) = GADA_PAIRS
        .iter()
        .find(|pair| houses.len() == 2 && houses.iter().all(|h| pair.contains(h)))
    {
        yogas.push(fixed("Gada Yoga", planets, pair.to_vec(), 70.0, true));
    }
    if houses.len() == 2 && houses.contains(&1) && houses.contains(&7) {
        yogas.push(fixed("Shakata Yoga", planets, occupied.clone(), 50.0, false));
    }
    for (name, template, strength, good) in QUARTER_TEMPLATES {
        if houses.len() >= 3 && houses.iter().all(|h| template.contains(h)) {
            yogas.push(fixed(name, planets, occupied.clone(), strength, good));
        }
    }

    let benefics: Vec<&PlanetPosition> = planets
        .iter()
        .copied()
        .filter(|p| is_natural_benefic(p.graha) && is_kendra(p.house))
        .collect();
    if benefics.len() >= 3 {
        yogas.push(fixed("Mala Yoga", &benefics, distinct_houses(&benefics), 85.0, true));
    }

    let malefics: Vec<&PlanetPosition> = planets
        .iter()
        .copied()
        .filter(|p| SARPA_GRAHAS.contains(&p.graha) && is_kendra(p.house))
        .collect();
    if malefics.len() >= 3 {
        yogas.push(fixed("Sarpa Yoga", &malefics, distinct_houses(&malefics), 40.0, false));
    }
    yogas
}

fn distinct_houses(planets: &[&PlanetPosition]) -> Vec<u8> {
    let set: BTreeSet<u8> = planets.iter().map(|p| p.house).collect();
    set.into_iter().collect()
}
