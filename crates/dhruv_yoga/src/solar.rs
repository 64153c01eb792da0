//! Solar yogas: Vesi, Vosi and Ubhayachari, formed by planets flanking the Sun.

use dhruv_chart::{ChartContext, Graha, PlanetPosition, is_natural_benefic};

use crate::chandra::tara_at_distance_from;
use crate::config::YogaConfig;
use crate::strength::score;
use crate::types::{Yoga, YogaCategory};

pub fn detect(chart: &ChartContext, config: &YogaConfig) -> Vec<Yoga> {
    let second = tara_at_distance_from(chart, Graha::Surya, 2);
    let twelfth = tara_at_distance_from(chart, Graha::Surya, 12);

    let yoga = match (second.is_empty(), twelfth.is_empty()) {
        (false, true) => build(chart, config, "Vesi Yoga", &second, 1.0),
        (true, false) => build(chart, config, "Vosi Yoga", &twelfth, 1.0),
        (false, false) => {
            let both: Vec<&PlanetPosition> = second.into_iter().chain(twelfth).collect();
            build(chart, config, "Ubhayachari Yoga", &both, 1.2)
        }
        (true, true) => return Vec::new(),
    };
    vec![yoga]
}

/// Scored on the flanking planets; the Sun is listed but not scored.
fn build(
    chart: &ChartContext,
    config: &YogaConfig,
    name: &str,
    flankers: &[&PlanetPosition],
    multiplier: f64,
) -> Yoga {
    let scored: Vec<Graha> = flankers.iter().map(|p| p.graha).collect();
    let s = score(chart, &scored, multiplier, config.node_aspects);
    let auspicious = flankers.iter().all(|p| is_natural_benefic(p.graha));

    let mut grahas = scored;
    grahas.push(Graha::Surya);
    let mut houses: Vec<u8> = flankers.iter().map(|p| p.house).collect();
    houses.dedup();

    Yoga::new(
        YogaCategory::Solar,
        name,
        grahas,
        houses,
        auspicious,
        s.strength,
        s.reasons,
    )
}
