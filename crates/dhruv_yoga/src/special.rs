//! Special yogas: bespoke predicates that fit no other family.

use std::collections::BTreeMap;

use dhruv_chart::bhava::{next_house, previous_house};
use dhruv_chart::combustion::position_combustion_factor;
use dhruv_chart::dignity::is_friend_sign;
use dhruv_chart::{
    ChartContext, Graha, SAPTA_GRAHAS, are_conjunct, are_in_exchange,
    are_mutually_aspecting, casts_drishti, is_debilitated, is_exalted, is_kendra,
    is_natural_benefic, is_own_sign,
};

use crate::config::YogaConfig;
use crate::strength::{Scored, base_strength, score};
use crate::types::{Yoga, YogaCategory};

/// Benefics counted by Amala, Saraswati and Parvata.
const SHUBHA_TRIO: [Graha; 3] = [Graha::Buddh, Graha::Guru, Graha::Shukra];
/// Malefics that spoil Parvata from a Kendra. The Sun does not.
const PARVATA_MALEFICS: [Graha; 4] = [Graha::Shani, Graha::Mangal, Graha::Rahu, Graha::Ketu];

const SARASWATI_HOUSES: [u8; 6] = [1, 4, 5, 7, 9, 10];

/// Sun houses that favour Budha-Aditya.
const BUDHA_ADITYA_HOUSES: [u8; 6] = [1, 4, 5, 9, 10, 11];
/// Mithuna, Simha, Kanya.
const BUDHA_ADITYA_SIGNS: [u8; 3] = [2, 4, 5];

/// Planets that can fight a Graha Yuddha, brightest first.
const WAR_BRIGHTNESS: [Graha; 5] = [
    Graha::Shukra,
    Graha::Guru,
    Graha::Buddh,
    Graha::Mangal,
    Graha::Shani,
];

pub const GRAHA_YUDDHA_STRENGTH: f64 = 60.0;
pub const SANYASA_STRENGTH: f64 = 60.0;

pub fn detect(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = Vec::new();
    yogas.extend(budha_aditya(chart, config));
    yogas.extend(amala(chart, config));
    yogas.extend(saraswati(chart, config));
    yogas.extend(sanyasa(chart));
    yogas.extend(parvata(chart, config));
    yogas.extend(kahala(chart, config));
    yogas.extend(chamara(chart, config));
    yogas.extend(shubhakartari(chart, config));
    yogas.extend(dharma_karmadhipati(chart, config));
    yogas.extend(graha_yuddha(chart, config));
    yogas
}

fn special(name: &str, grahas: Vec<Graha>, houses: Vec<u8>, s: Scored) -> Yoga {
    Yoga::new(YogaCategory::Special, name, grahas, houses, true, s.strength, s.reasons)
}

// ---------------------------------------------------------------------------
// Budha-Aditya
// ---------------------------------------------------------------------------

fn budha_aditya(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let sun = chart.position(Graha::Surya);
    let merc = chart.position(Graha::Buddh);
    if !are_conjunct(sun, merc, config.close_orb) {
        return None;
    }

    let mut strength = base_strength(&[sun, merc]);
    let mut reasons = Vec::new();

    let cf = position_combustion_factor(merc, chart);
    strength *= if cf < 0.5 { 0.7 * cf } else { 0.9 * cf };
    if cf < 0.6 {
        reasons.push("Mercury too close to Sun - yoga weakened".to_string());
    }
    if BUDHA_ADITYA_HOUSES.contains(&sun.house) {
        strength *= 1.15;
    }
    if BUDHA_ADITYA_SIGNS.contains(&sun.rashi_index) {
        strength *= 1.1;
    }
    if is_debilitated(Graha::Buddh, merc.rashi_index) {
        strength *= 0.7;
        reasons.push("Mercury debilitated".to_string());
    }

    Some(Yoga::new(
        YogaCategory::Special,
        "Budha-Aditya Yoga",
        vec![Graha::Surya, Graha::Buddh],
        vec![sun.house],
        true,
        strength,
        reasons,
    ))
}

// ---------------------------------------------------------------------------
// Amala, Saraswati, Parvata
// ---------------------------------------------------------------------------

fn amala(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = Vec::new();

    let from_lagna: Vec<Graha> = SHUBHA_TRIO
        .into_iter()
        .filter(|&g| chart.position(g).house == 10)
        .collect();
    if !from_lagna.is_empty() {
        let s = score(chart, &from_lagna, 1.0, config.node_aspects);
        yogas.push(special("Amala Yoga (from Lagna)", from_lagna, vec![10], s));
    }

    let from_moon: Vec<Graha> = SHUBHA_TRIO
        .into_iter()
        .filter(|&g| chart.distance_between(Graha::Chandra, g) == 10)
        .collect();
    if !from_moon.is_empty() {
        let houses = from_moon.iter().map(|&g| chart.position(g).house).collect();
        let s = score(chart, &from_moon, 1.0, config.node_aspects);
        yogas.push(special("Amala Yoga (from Moon)", from_moon, houses, s));
    }
    yogas
}

fn saraswati(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let trio = [Graha::Guru, Graha::Shukra, Graha::Buddh];
    if !trio
        .iter()
        .all(|&g| SARASWATI_HOUSES.contains(&chart.position(g).house))
    {
        return None;
    }
    let jup = chart.position(Graha::Guru);
    let dignified =
        is_exalted(Graha::Guru, jup.rashi_index) || is_own_sign(Graha::Guru, jup.rashi_index);
    if !dignified && !is_friend_sign(Graha::Guru, jup.rashi_index) {
        return None;
    }
    let multiplier = if dignified { 1.2 } else { 1.0 };
    let houses = trio.iter().map(|&g| chart.position(g).house).collect();
    let s = score(chart, &trio, multiplier, config.node_aspects);
    Some(special("Saraswati Yoga", trio.to_vec(), houses, s))
}

fn parvata(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    if PARVATA_MALEFICS.iter().any(|&g| is_kendra(chart.position(g).house)) {
        return None;
    }
    let in_kendra: Vec<Graha> = SHUBHA_TRIO
        .into_iter()
        .filter(|&g| is_kendra(chart.position(g).house))
        .collect();
    if in_kendra.len() < 2 {
        return None;
    }
    let houses = in_kendra.iter().map(|&g| chart.position(g).house).collect();
    let s = score(chart, &in_kendra, 1.0, config.node_aspects);
    Some(special("Parvata Yoga", in_kendra, houses, s))
}

// ---------------------------------------------------------------------------
// Sanyasa
// ---------------------------------------------------------------------------

fn sanyasa(chart: &ChartContext) -> Option<Yoga> {
    let mut by_house: BTreeMap<u8, Vec<Graha>> = BTreeMap::new();
    for g in SAPTA_GRAHAS {
        by_house.entry(chart.position(g).house).or_default().push(g);
    }
    let (house, grahas) = by_house.into_iter().find(|(_, gs)| gs.len() >= 4)?;
    Some(Yoga::new(
        YogaCategory::Special,
        "Sanyasa Yoga",
        grahas,
        vec![house],
        true,
        SANYASA_STRENGTH,
        Vec::new(),
    ))
}

// ---------------------------------------------------------------------------
// Lordship yogas
// ---------------------------------------------------------------------------

fn kahala(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let l4 = chart.lord_of_house(4)?;
    let l9 = chart.lord_of_house(9)?;
    if l4 == l9 || !is_kendra(chart.distance_between(l9, l4)) {
        return None;
    }
    let s = score(chart, &[l4, l9], 1.0, config.node_aspects);
    let houses = vec![chart.position(l4).house, chart.position(l9).house];
    Some(special("Kahala Yoga", vec![l4, l9], houses, s))
}

fn chamara(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let lord = chart.lord_position(1)?;
    if !is_exalted(lord.graha, lord.rashi_index)
        || !casts_drishti(chart.position(Graha::Guru), lord, config.node_aspects)
    {
        return None;
    }
    let s = score(chart, &[lord.graha, Graha::Guru], 1.2, config.node_aspects);
    Some(special("Chamara Yoga", vec![lord.graha, Graha::Guru], vec![lord.house], s))
}

fn dharma_karmadhipati(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let l9 = chart.lord_position(9)?;
    let l10 = chart.lord_position(10)?;
    if l9.graha == l10.graha {
        return None;
    }
    let connected = are_conjunct(l9, l10, config.conjunction_orb)
        || are_mutually_aspecting(l9, l10)
        || are_in_exchange(l9, l10);
    if !connected {
        return None;
    }
    let s = score(chart, &[l9.graha, l10.graha], 1.0, config.node_aspects);
    Some(special(
        "Dharma-Karmadhipati Yoga",
        vec![l9.graha, l10.graha],
        vec![l9.house, l10.house],
        s,
    ))
}

// ---------------------------------------------------------------------------
// Shubhakartari
// ---------------------------------------------------------------------------

fn benefics_in(chart: &ChartContext, house: u8, exclude: Graha) -> Vec<Graha> {
    SAPTA_GRAHAS
        .into_iter()
        .filter(|&g| g != exclude && is_natural_benefic(g) && chart.position(g).house == house)
        .collect()
}

fn shubhakartari(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = Vec::new();

    let before = benefics_in(chart, 12, Graha::Surya);
    let after = benefics_in(chart, 2, Graha::Surya);
    if !before.is_empty() && !after.is_empty() {
        let grahas: Vec<Graha> = before.into_iter().chain(after).collect();
        let s = score(chart, &grahas, 1.0, config.node_aspects);
        yogas.push(special("Shubhakartari Yoga (Lagna)", grahas, vec![12, 1, 2], s));
    }

    let moon = chart.position(Graha::Chandra);
    let (prev, next) = (previous_house(moon.house), next_house(moon.house));
    let before = benefics_in(chart, prev, Graha::Chandra);
    let after = benefics_in(chart, next, Graha::Chandra);
    if !before.is_empty() && !after.is_empty() {
        let grahas: Vec<Graha> = before.into_iter().chain(after).collect();
        let mut scored = grahas.clone();
        scored.push(Graha::Chandra);
        let s = score(chart, &scored, 1.0, config.node_aspects);
        yogas.push(special(
            "Shubhakartari Yoga (Chandra)",
            grahas,
            vec![prev, moon.house, next],
            s,
        ));
    }
    yogas
}

// ---------------------------------------------------------------------------
// Graha Yuddha
// ---------------------------------------------------------------------------

/// Order two warring planets as (winner, loser) by brightness.
pub fn war_outcome(a: Graha, b: Graha) -> Option<(Graha, Graha)> {
    let rank = |g: Graha| WAR_BRIGHTNESS.iter().position(|&w| w == g);
    match (rank(a)?, rank(b)?) {
        (ra, rb) if ra < rb => Some((a, b)),
        (ra, rb) if rb < ra => Some((b, a)),
        _ => None,
    }
}

fn graha_yuddha(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = Vec::new();
    for (i, &a) in WAR_BRIGHTNESS.iter().enumerate() {
        for &b in &WAR_BRIGHTNESS[i + 1..] {
            if !are_conjunct(chart.position(a), chart.position(b), config.war_orb) {
                continue;
            }
            let Some((winner, loser)) = war_outcome(a, b) else {
                continue;
            };
            yogas.push(Yoga::new(
                YogaCategory::Special,
                "Graha Yuddha",
                vec![winner, loser],
                vec![chart.position(loser).house],
                false,
                GRAHA_YUDDHA_STRENGTH,
                vec![format!(
                    "{} defeated by {}",
                    loser.english_name(),
                    winner.english_name()
                )],
            ));
        }
    }
    yogas
}
