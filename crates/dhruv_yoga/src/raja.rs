//! Raja yogas: combinations of Kendra and Trikona lords, Dusthana lords,
//! and cancelled debilitation.

use std::collections::BTreeSet;

use dhruv_chart::bhava::{DUSTHANA_HOUSES, KENDRA_HOUSES, TRIKONA_HOUSES};
use dhruv_chart::combustion::position_combustion_factor;
use dhruv_chart::{
    ChartContext, Graha, are_conjunct, are_in_exchange, are_mutually_aspecting, is_debilitated,
    is_exalted, is_kendra, is_own_sign, rashi_lord_by_index,
};

use crate::config::YogaConfig;
use crate::strength::{
    base_strength, benefic_boost_factor, is_papakartari, malefic_affliction_factor, score,
};
use crate::types::{Yoga, YogaCategory};

/// Lords of the given houses, deduplicated, in house order.
pub(crate) fn distinct_lords(chart: &ChartContext, houses: &[u8]) -> Vec<Graha> {
    let mut lords = Vec::with_capacity(houses.len());
    for &h in houses {
        if let Some(lord) = chart.lord_of_house(h) {
            if !lords.contains(&lord) {
                lords.push(lord);
            }
        }
    }
    lords
}

pub fn detect(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = kendra_trikona(chart, config);
    yogas.extend(viparita(chart, config));
    yogas.extend(neecha_bhanga(chart, config));
    yogas.extend(maha_raja(chart, config));
    yogas
}

// ---------------------------------------------------------------------------
// Kendra-Trikona and Parivartana
// ---------------------------------------------------------------------------

fn kendra_trikona(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let kendra_lords = distinct_lords(chart, &KENDRA_HOUSES);
    let trikona_lords = distinct_lords(chart, &TRIKONA_HOUSES);
    let mut seen = BTreeSet::new();
    let mut yogas = Vec::new();

    for &k in &kendra_lords {
        for &t in &trikona_lords {
            if k == t || !seen.insert((k.min(t), k.max(t))) {
                continue;
            }
            let (kp, tp) = (chart.position(k), chart.position(t));
            let houses = vec![kp.house, tp.house];

            if are_conjunct(kp, tp, config.conjunction_orb) {
                let s = score(chart, &[k, t], 1.0, config.node_aspects);
                yogas.push(Yoga::new(
                    YogaCategory::Raja,
                    "Kendra-Trikona Raja Yoga",
                    vec![k, t],
                    houses.clone(),
                    true,
                    s.strength,
                    s.reasons,
                ));
            }
            if are_mutually_aspecting(kp, tp) {
                let s = score(chart, &[k, t], 0.8, config.node_aspects);
                yogas.push(Yoga::new(
                    YogaCategory::Raja,
                    "Kendra-Trikona Raja Yoga",
                    vec![k, t],
                    houses.clone(),
                    true,
                    s.strength,
                    s.reasons,
                ));
            }
            if are_in_exchange(kp, tp) {
                let s = score(chart, &[k, t], 1.2, config.node_aspects);
                yogas.push(Yoga::new(
                    YogaCategory::Raja,
                    "Parivartana Raja Yoga",
                    vec![k, t],
                    houses,
                    true,
                    s.strength,
                    s.reasons,
                ));
            }
        }
    }
    yogas
}

// ---------------------------------------------------------------------------
// Viparita
// ---------------------------------------------------------------------------

fn viparita(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let lords = distinct_lords(chart, &DUSTHANA_HOUSES);
    let mut yogas = Vec::new();

    for (i, &a) in lords.iter().enumerate() {
        for &b in &lords[i + 1..] {
            let (pa, pb) = (chart.position(a), chart.position(b));
            if !(are_in_exchange(pa, pb) || are_conjunct(pa, pb, config.conjunction_orb)) {
                continue;
            }
            let mut s = score(chart, &[a, b], 0.7, config.node_aspects);
            for p in [pa, pb] {
                if is_exalted(p.graha, p.rashi_index) || is_own_sign(p.graha, p.rashi_index) {
                    s.reasons.push(format!(
                        "{} is strong - Viparita results may be modified",
                        p.graha.english_name()
                    ));
                }
            }
            yogas.push(Yoga::new(
                YogaCategory::Raja,
                "Viparita Raja Yoga",
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

// ---------------------------------------------------------------------------
// Neecha Bhanga
// ---------------------------------------------------------------------------

fn neecha_bhanga(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = Vec::new();

    for pos in chart.positions() {
        if !is_debilitated(pos.graha, pos.rashi_index) {
            continue;
        }
        let via = if is_kendra(pos.house) {
            "Neecha Bhanga via Kendra placement"
        } else if rashi_lord_by_index(pos.rashi_index)
            .is_some_and(|lord| is_kendra(chart.position(lord).house))
        {
            "Neecha Bhanga via sign lord in Kendra"
        } else {
            continue;
        };

        let name = pos.graha.english_name();
        let mut strength = base_strength(&[pos]);
        let mut reasons = vec![via.to_string()];

        let combust = position_combustion_factor(pos, chart);
        if combust < 0.9 {
            strength *= combust;
            if combust < 0.6 {
                reasons.push(format!("{name} is combust - Neecha Bhanga weakened"));
            }
        }
        let affliction = malefic_affliction_factor(pos, chart, config.node_aspects);
        if affliction < 0.85 {
            strength *= affliction;
            reasons.push("Malefic aspects reduce yoga effectiveness".to_string());
        }
        if is_papakartari(pos, chart) {
            strength *= 0.8;
            reasons.push("Planet hemmed between malefics".to_string());
        }
        let boost = benefic_boost_factor(pos, chart, config.node_aspects);
        if boost > 1.0 {
            strength *= boost;
        }

        yogas.push(Yoga::new(
            YogaCategory::Raja,
            "Neecha Bhanga Raja Yoga",
            vec![pos.graha],
            vec![pos.house],
            true,
            strength,
            reasons,
        ));
    }
    yogas
}

// ---------------------------------------------------------------------------
// Maha Raja
// ---------------------------------------------------------------------------

fn maha_raja(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let jup = chart.distance_between(Graha::Chandra, Graha::Guru);
    let ven = chart.distance_between(Graha::Chandra, Graha::Shukra);
    if !(is_kendra(jup) && is_kendra(ven)) {
        return Vec::new();
    }
    let grahas = [Graha::Guru, Graha::Shukra, Graha::Chandra];
    let s = score(chart, &grahas, 1.0, config.node_aspects);
    vec![Yoga::new(
        YogaCategory::Raja,
        "Maha Raja Yoga",
        grahas.to_vec(),
        vec![
            chart.position(Graha::Guru).house,
            chart.position(Graha::Shukra).house,
        ],
        true,
        s.strength,
        s.reasons,
    )]
}
