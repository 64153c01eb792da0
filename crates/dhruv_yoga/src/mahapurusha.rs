//! Pancha-Mahapurusha yogas.
//!
//! Mars, Mercury, Jupiter, Venus or Saturn in a Kendra house while in its
//! own or exaltation sign. Strength follows its own formula instead of the
//! shared pipeline: a high base from the Kendra house, then combustion,
//! benefic drishti, malefic drishti, hemming and placement from the Moon.

use dhruv_chart::combustion::position_combustion_factor;
use dhruv_chart::dignity::has_dig_bala;
use dhruv_chart::{
    ChartContext, Graha, PlanetPosition, TARA_GRAHAS, is_exalted, is_kendra, is_own_sign,
};

use crate::config::YogaConfig;
use crate::strength::{benefic_boost_factor, is_papakartari, malefic_affliction_factor};
use crate::types::{Yoga, YogaCategory};

pub const MAHAPURUSHA_BASE: f64 = 70.0;

/// Yoga name for each Tara graha.
pub const fn mahapurusha_name(graha: Graha) -> Option<&'static str> {
    match graha {
        Graha::Mangal => Some("Ruchaka Mahapurusha Yoga"),
        Graha::Buddh => Some("Bhadra Mahapurusha Yoga"),
        Graha::Guru => Some("Hamsa Mahapurusha Yoga"),
        Graha::Shukra => Some("Malavya Mahapurusha Yoga"),
        Graha::Shani => Some("Sasa Mahapurusha Yoga"),
        _ => None,
    }
}

/// Bonus for the specific Kendra occupied.
const fn kendra_bonus(house: u8) -> f64 {
    match house {
        1 => 15.0,
        10 => 12.0,
        7 => 10.0,
        4 => 8.0,
        _ => 0.0,
    }
}

/// Strength before any modifier: base, Kendra bonus and Dig Bala.
pub fn mahapurusha_base(pos: &PlanetPosition) -> f64 {
    let mut s = MAHAPURUSHA_BASE + kendra_bonus(pos.house);
    if has_dig_bala(pos.graha, pos.house) {
        s += 5.0;
    }
    s
}

pub fn detect(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = Vec::new();
    for graha in TARA_GRAHAS {
        let pos = chart.position(graha);
        if !is_kendra(pos.house) {
            continue;
        }
        if !(is_own_sign(graha, pos.rashi_index) || is_exalted(graha, pos.rashi_index)) {
            continue;
        }
        let Some(name) = mahapurusha_name(graha) else {
            continue;
        };
        let (strength, reasons) = modified_strength(pos, chart, config);
        yogas.push(Yoga::new(
            YogaCategory::Mahapurusha,
            name,
            vec![graha],
            vec![pos.house],
            true,
            strength,
            reasons,
        ));
    }
    yogas
}

fn modified_strength(
    pos: &PlanetPosition,
    chart: &ChartContext,
    config: &YogaConfig,
) -> (f64, Vec<String>) {
    let policy = config.mahapurusha_node_aspects;
    let mut strength = mahapurusha_base(pos);
    let mut reasons = Vec::new();

    let combust = position_combustion_factor(pos, chart);
    strength *= combust;
    if combust < 0.6 {
        reasons.push(format!(
            "{} is combust - yoga significantly weakened",
            pos.graha.english_name()
        ));
    }

    strength *= benefic_boost_factor(pos, chart, policy);

    let affliction = malefic_affliction_factor(pos, chart, policy);
    if affliction < 0.85 {
        strength *= affliction;
        reasons.push("Malefic aspects reduce yoga results".to_string());
    }

    if is_papakartari(pos, chart) {
        strength *= 0.75;
        reasons.push("Planet hemmed between malefics".to_string());
    }

    match chart.distance_between(Graha::Chandra, pos.graha) {
        6 | 8 | 12 => {
            strength *= 0.85;
            reasons.push("Weak position from Moon".to_string());
        }
        d if is_kendra(d) => strength *= 1.1,
        _ => {}
    }

    (strength, reasons)
}
