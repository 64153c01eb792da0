//! Negative (Arishta) yogas.
//!
//! Severity is reported through `strength_percentage`; mitigations lower it
//! and are listed as cancellation reasons.

use dhruv_chart::util::{angular_separation, forward_arc};
use dhruv_chart::{
    ChartContext, Graha, PlanetPosition, SAPTA_GRAHAS, TARA_GRAHAS, are_conjunct, casts_drishti,
    is_exalted, is_kendra, is_own_sign,
};

use crate::config::YogaConfig;
use crate::strength::{PAPA_GRAHAS, is_papakartari};
use crate::types::{Yoga, YogaCategory};

pub const KEMADRUMA_STRENGTH: f64 = 80.0;
pub const KEMADRUMA_CANCELLED_STRENGTH: f64 = 20.0;
pub const KALA_SARPA_STRENGTH: f64 = 75.0;
pub const PARTIAL_KALA_SARPA_STRENGTH: f64 = 45.0;
pub const SAKATA_STRENGTH: f64 = 60.0;
pub const SAKATA_BHANGA_STRENGTH: f64 = 55.0;

/// Kala Sarpa sub-type keyed by Rahu's house (1-based).
pub const KALA_SARPA_TYPES: [&str; 12] = [
    "Ananta",
    "Kulika",
    "Vasuki",
    "Shankhapala",
    "Padma",
    "Mahapadma",
    "Takshaka",
    "Karkotaka",
    "Shankhachuda",
    "Ghataka",
    "Vishdhara",
    "Sheshanaga",
];

pub fn detect(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let mut yogas = Vec::new();
    yogas.extend(kemadruma(chart, config));
    yogas.extend(daridra(chart, config));
    yogas.extend(guru_chandal(chart, config));
    yogas.extend(grahan(chart, config));
    yogas.extend(angarak(chart, config));
    yogas.extend(shrapit(chart, config));
    yogas.extend(kala_sarpa(chart, config));
    yogas.extend(sakata(chart));
    yogas.extend(papakartari(chart));
    yogas
}

fn negative(
    name: impl Into<String>,
    grahas: Vec<Graha>,
    houses: Vec<u8>,
    severity: f64,
    reasons: Vec<String>,
) -> Yoga {
    Yoga::new(YogaCategory::Negative, name, grahas, houses, false, severity, reasons)
}

fn dignified(pos: &PlanetPosition) -> bool {
    is_exalted(pos.graha, pos.rashi_index) || is_own_sign(pos.graha, pos.rashi_index)
}

// ---------------------------------------------------------------------------
// Kemadruma
// ---------------------------------------------------------------------------

fn kemadruma(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let flanked = chart
        .at_distance_from(Graha::Chandra, 2)
        .chain(chart.at_distance_from(Graha::Chandra, 12))
        .any(|p| TARA_GRAHAS.contains(&p.graha));
    if flanked {
        return None;
    }

    let moon = chart.position(Graha::Chandra);
    let jup = chart.position(Graha::Guru);
    let mut reasons = Vec::new();

    if is_kendra(moon.house) {
        reasons.push("Moon in Kendra from Lagna".to_string());
    }
    if casts_drishti(jup, moon, config.node_aspects)
        || are_conjunct(jup, moon, config.conjunction_orb)
    {
        reasons.push("Jupiter aspects or joins the Moon".to_string());
    }
    let supporters: Vec<&str> = SAPTA_GRAHAS
        .iter()
        .filter(|&&g| g != Graha::Chandra)
        .filter(|&&g| is_kendra(chart.distance_between(Graha::Chandra, g)))
        .map(|g| g.english_name())
        .collect();
    if !supporters.is_empty() {
        reasons.push(format!("{} in Kendra from Moon", supporters.join(", ")));
    }

    let strength = if reasons.is_empty() {
        KEMADRUMA_STRENGTH
    } else {
        KEMADRUMA_CANCELLED_STRENGTH
    };
    Some(negative("Kemadruma Yoga", vec![Graha::Chandra], vec![moon.house], strength, reasons))
}

// ---------------------------------------------------------------------------
// Daridra
// ---------------------------------------------------------------------------

fn daridra(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let lord = chart.lord_position(11)?;
    let severity = match lord.house {
        8 => 70.0,
        12 => 60.0,
        6 => 50.0,
        _ => return None,
    };
    let mut reasons = Vec::new();
    if dignified(lord) {
        reasons.push(format!("{} in own or exaltation sign", lord.graha.english_name()));
    }
    if lord.graha != Graha::Guru
        && casts_drishti(chart.position(Graha::Guru), lord, config.node_aspects)
    {
        reasons.push("Jupiter aspect provides protection".to_string());
    }
    Some(negative("Daridra Yoga", vec![lord.graha], vec![lord.house], severity, reasons))
}

// ---------------------------------------------------------------------------
// Node conjunctions
// ---------------------------------------------------------------------------

fn guru_chandal(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let jup = chart.position(Graha::Guru);
    if !are_conjunct(jup, chart.position(Graha::Rahu), config.node_orb) {
        return None;
    }
    let mut severity = 65.0;
    let mut reasons = Vec::new();
    if dignified(jup) {
        severity -= 20.0;
        reasons.push("Jupiter in dignity - wisdom prevails".to_string());
    }
    if matches!(jup.house, 1 | 5 | 9 | 11) {
        severity -= 10.0;
        reasons.push("Good house placement allows positive transformation".to_string());
    }
    Some(negative(
        "Guru-Chandal Yoga",
        vec![Graha::Guru, Graha::Rahu],
        vec![jup.house],
        severity,
        reasons,
    ))
}

/// Severity by orb: tighter eclipses are worse.
pub fn grahan_severity(separation: f64) -> f64 {
    if separation <= 3.0 {
        75.0
    } else if separation <= 6.0 {
        65.0
    } else if separation <= 9.0 {
        55.0
    } else {
        45.0
    }
}

fn grahan(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    const PAIRS: [(Graha, Graha, &str); 4] = [
        (Graha::Surya, Graha::Rahu, "Surya Grahan Yoga"),
        (Graha::Surya, Graha::Ketu, "Surya-Ketu Grahan Yoga"),
        (Graha::Chandra, Graha::Rahu, "Chandra Grahan Yoga"),
        (Graha::Chandra, Graha::Ketu, "Chandra-Ketu Grahan Yoga"),
    ];
    PAIRS
        .iter()
        .filter_map(|&(luminary, node, name)| {
            let (l, n) = (chart.position(luminary), chart.position(node));
            let sep = angular_separation(l.longitude, n.longitude);
            (sep <= config.eclipse_orb).then(|| {
                negative(name, vec![luminary, node], vec![l.house], grahan_severity(sep), Vec::new())
            })
        })
        .collect()
}

fn angarak(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let mars = chart.position(Graha::Mangal);
    if !are_conjunct(mars, chart.position(Graha::Rahu), config.node_orb) {
        return None;
    }
    let mut severity = 70.0;
    let mut reasons = Vec::new();
    if dignified(mars) {
        severity -= 15.0;
        reasons.push("Mars in dignity - energy channeled constructively".to_string());
    }
    if matches!(mars.house, 3 | 6 | 10 | 11) {
        severity -= 10.0;
        reasons.push("Upachaya house placement - competitive success possible".to_string());
    }
    Some(negative(
        "Angarak Yoga",
        vec![Graha::Mangal, Graha::Rahu],
        vec![mars.house],
        severity,
        reasons,
    ))
}

fn shrapit(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let sat = chart.position(Graha::Shani);
    if !are_conjunct(sat, chart.position(Graha::Rahu), config.node_orb) {
        return None;
    }
    let mut severity = 65.0;
    let mut reasons = Vec::new();
    if dignified(sat) {
        severity -= 20.0;
        reasons.push("Saturn in dignity - karmic debts can be cleared".to_string());
    }
    if casts_drishti(chart.position(Graha::Guru), sat, config.node_aspects) {
        severity -= 15.0;
        reasons.push("Jupiter aspect - divine grace available".to_string());
    }
    Some(negative(
        "Shrapit Yoga",
        vec![Graha::Shani, Graha::Rahu],
        vec![sat.house],
        severity,
        reasons,
    ))
}

// ---------------------------------------------------------------------------
// Kala Sarpa
// ---------------------------------------------------------------------------

/// Forward arc of the nodal axis that holds the hemmed planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodalSide {
    /// Forward from Rahu to Ketu.
    RahuToKetu,
    /// Forward from Ketu to Rahu.
    KetuToRahu,
}

/// How the seven classical planets sit against the nodal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodalHemming {
    /// All seven strictly inside one side.
    Full(NodalSide),
    /// Six inside one side; `outside` breaks the pattern.
    Partial { side: NodalSide, outside: Graha },
}

fn strictly_inside(start: f64, lon: f64) -> bool {
    let arc = forward_arc(start, lon);
    arc > 0.0 && arc < 180.0
}

/// Classify the nodal hemming. A full pattern on either side wins over a partial one.
pub fn nodal_hemming(chart: &ChartContext) -> Option<NodalHemming> {
    let sides = [
        (NodalSide::RahuToKetu, chart.position(Graha::Rahu).longitude),
        (NodalSide::KetuToRahu, chart.position(Graha::Ketu).longitude),
    ];
    let outside_of = |start: f64| -> Vec<Graha> {
        SAPTA_GRAHAS
            .into_iter()
            .filter(|&g| !strictly_inside(start, chart.position(g).longitude))
            .collect()
    };

    for (side, start) in sides {
        if outside_of(start).is_empty() {
            return Some(NodalHemming::Full(side));
        }
    }
    for (side, start) in sides {
        if let [outside] = outside_of(start).as_slice() {
            return Some(NodalHemming::Partial {
                side,
                outside: *outside,
            });
        }
    }
    None
}

fn kala_sarpa(chart: &ChartContext, config: &YogaConfig) -> Option<Yoga> {
    let kind = nodal_hemming(chart)?;
    let rahu = chart.position(Graha::Rahu);
    let ketu = chart.position(Graha::Ketu);
    let sub_type = KALA_SARPA_TYPES.get(usize::from(rahu.house).checked_sub(1)?)?;

    let mut reasons = Vec::new();
    let (name, mut strength) = match kind {
        NodalHemming::Full(_) => (format!("{sub_type} Kala Sarpa Yoga"), KALA_SARPA_STRENGTH),
        NodalHemming::Partial { outside, .. } => {
            reasons.push(format!(
                "Broken by {} outside the Rahu-Ketu axis",
                outside.english_name()
            ));
            (format!("Partial {sub_type} Kala Sarpa Yoga"), PARTIAL_KALA_SARPA_STRENGTH)
        }
    };

    let near_node = SAPTA_GRAHAS.iter().find(|&&g| {
        let p = chart.position(g);
        are_conjunct(p, rahu, config.exact_orb) || are_conjunct(p, ketu, config.exact_orb)
    });
    if let Some(g) = near_node {
        strength *= 0.8;
        reasons.push(format!("{} close to the nodal axis breaks the pattern", g.english_name()));
    }
    let jup = chart.position(Graha::Guru);
    if casts_drishti(jup, rahu, config.node_aspects) || casts_drishti(jup, ketu, config.node_aspects)
    {
        strength *= 0.85;
        reasons.push("Jupiter aspect on Rahu/Ketu axis provides protection".to_string());
    }

    Some(negative(
        name,
        vec![Graha::Rahu, Graha::Ketu],
        vec![rahu.house, ketu.house],
        strength,
        reasons,
    ))
}

// ---------------------------------------------------------------------------
// Sakata, Papakartari
// ---------------------------------------------------------------------------

/// Sakata, or its Bhanga when the Moon holds a Kendra house.
///
/// The Bhanga is an auspicious Special yoga but is reported from this family
/// since it only exists as the cancelled form of Sakata.
fn sakata(chart: &ChartContext) -> Option<Yoga> {
    if !matches!(chart.distance_between(Graha::Guru, Graha::Chandra), 6 | 8 | 12) {
        return None;
    }
    let moon = chart.position(Graha::Chandra);
    let grahas = vec![Graha::Chandra, Graha::Guru];
    let houses = vec![moon.house, chart.position(Graha::Guru).house];
    if is_kendra(moon.house) {
        return Some(Yoga::new(
            YogaCategory::Special,
            "Kemadruma Bhanga (Sakata Cancellation)",
            grahas,
            houses,
            true,
            SAKATA_BHANGA_STRENGTH,
            vec!["Moon in Kendra from Lagna cancels Sakata Yoga".to_string()],
        ));
    }
    Some(negative("Sakata Yoga", grahas, houses, SAKATA_STRENGTH, Vec::new()))
}

fn malefics_in(chart: &ChartContext, house: u8) -> Vec<Graha> {
    PAPA_GRAHAS
        .into_iter()
        .filter(|&g| chart.position(g).house == house)
        .collect()
}

fn papakartari(chart: &ChartContext) -> Vec<Yoga> {
    let mut yogas = Vec::new();

    let (before, after) = (malefics_in(chart, 12), malefics_in(chart, 2));
    if !before.is_empty() && !after.is_empty() {
        let grahas = before.into_iter().chain(after).collect();
        yogas.push(negative("Papakartari Yoga (Lagna)", grahas, vec![12, 1, 2], 55.0, Vec::new()));
    }

    let moon = chart.position(Graha::Chandra);
    if is_papakartari(moon, chart) {
        yogas.push(negative(
            "Papakartari Yoga (Chandra)",
            vec![Graha::Chandra],
            vec![moon.house],
            60.0,
            Vec::new(),
        ));
    }
    yogas
}
