//! End-to-end and property checks for the full analysis.

use dhruv_chart::{ChartContext, Graha};
use dhruv_yoga::nabhasa::SANKHYA_NAMES;
use dhruv_yoga::{
    MAHAPURUSHA_MIN_STRENGTH, MAX_STRENGTH, MIN_STRENGTH, NO_CANCELLATION, YogaAnalysis,
    YogaCategory, YogaConfig, analyze,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn chart_from(asc: f64, lons: [f64; 9]) -> ChartContext {
    ChartContext::from_sidereal(asc, lons, [1.0; 9]).unwrap()
}

fn run(chart: &ChartContext) -> YogaAnalysis {
    analyze(chart, &YogaConfig::default())
}

#[test]
fn kemadruma_cancelled_by_kendra_from_moon() {
    // Moon alone in Simha with nothing in Karka or Kanya.
    let lons = [70.0, 130.0, 250.0, 280.0, 285.0, 290.0, 295.0, 100.0, 280.0];
    let a = run(&chart_from(5.0, lons));
    let k = a.yogas.iter().find(|y| y.name() == "Kemadruma Yoga").unwrap();
    assert!((k.strength_percentage() - 80.0).abs() < EPS);
    assert!(!k.is_auspicious());

    let mut lons = lons;
    lons[2] = 220.0; // Mars into Vrischika, 4th from the Moon
    let a = run(&chart_from(5.0, lons));
    let k = a.yogas.iter().find(|y| y.name() == "Kemadruma Yoga").unwrap();
    assert!((k.strength_percentage() - 20.0).abs() < EPS);
    assert_eq!(k.cancellation_reasons(), &["Mars in Kendra from Moon".to_string()]);
}

#[test]
fn hamsa_in_lagna() {
    let a = run(&chart_from(
        92.0,
        [10.0, 40.0, 160.0, 25.0, 95.0, 50.0, 310.0, 70.0, 250.0],
    ));
    assert!(a.has_mahapurusha_yoga());
    let hamsa: Vec<_> = a
        .by_category(YogaCategory::Mahapurusha)
        .filter(|y| y.name() == "Hamsa Mahapurusha Yoga")
        .collect();
    assert_eq!(hamsa.len(), 1);
    assert_eq!(hamsa[0].grahas(), &[Graha::Guru]);
    assert_eq!(hamsa[0].houses(), &[1]);
}

#[test]
fn kala_sarpa_reported_by_quick_check() {
    let a = run(&chart_from(
        5.0,
        [10.0, 40.0, 70.0, 100.0, 130.0, 150.0, 170.0, 0.5, 180.5],
    ));
    assert!(a.has_kala_sarpa_yoga());
    assert!(a.has_named("Ananta Kala Sarpa Yoga"));
    assert!(a.most_challenging().is_some());
}

#[test]
fn kala_sarpa_survives_swapping_the_nodes() {
    let a = run(&chart_from(
        5.0,
        [10.0, 40.0, 70.0, 100.0, 130.0, 150.0, 170.0, 180.5, 0.5],
    ));
    assert!(a.has_kala_sarpa_yoga());
    let ks = a
        .by_category(YogaCategory::Negative)
        .find(|y| y.name() == "Takshaka Kala Sarpa Yoga")
        .unwrap();
    assert!(!ks.is_auspicious());
}

#[test]
fn sakata_bhanga_is_auspicious_special() {
    // Mesha lagna, Moon in Karka, Jupiter in Dhanu.
    let a = run(&chart_from(
        5.0,
        [70.0, 100.0, 220.0, 40.0, 250.0, 10.0, 160.0, 130.0, 310.0],
    ));
    assert!(!a.has_named("Sakata Yoga"));
    let b = a
        .by_category(YogaCategory::Special)
        .find(|y| y.name() == "Kemadruma Bhanga (Sakata Cancellation)")
        .unwrap();
    assert!(b.is_auspicious());
    assert!((b.strength_percentage() - 55.0).abs() < EPS);
}

#[test]
fn analysis_serializes_to_json() {
    let chart = chart_from(
        100.0,
        [10.0, 95.0, 200.0, 25.0, 250.0, 340.0, 300.0, 60.0, 240.0],
    );
    let a = run(&chart);
    let json = serde_json::to_value(&a).unwrap();
    let names: Vec<&str> = json["yogas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|y| y["name"].as_str().unwrap())
        .collect();
    let expected: Vec<&str> = a.yogas.iter().map(|y| y.name()).collect();
    assert_eq!(names, expected);
    assert_eq!(json["dominant_category"].is_null(), a.dominant_category.is_none());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_chart() -> impl Strategy<Value = ChartContext> {
    (0.0..360.0f64, prop::array::uniform8(0.0..360.0f64)).prop_map(|(asc, l)| {
        let lons = [l[0], l[1], l[2], l[3], l[4], l[5], l[6], l[7], (l[7] + 180.0) % 360.0];
        chart_from(asc, lons)
    })
}

proptest! {
    #[test]
    fn strengths_stay_in_range(chart in arb_chart()) {
        let a = run(&chart);
        prop_assert!((0.0..=100.0).contains(&a.overall_strength));
        for y in &a.yogas {
            let min = if y.category() == YogaCategory::Mahapurusha {
                MAHAPURUSHA_MIN_STRENGTH
            } else {
                MIN_STRENGTH
            };
            prop_assert!(y.strength_percentage() >= min - EPS, "{}", y.name());
            prop_assert!(y.strength_percentage() <= MAX_STRENGTH + EPS, "{}", y.name());
            prop_assert!(!y.cancellation_reasons().is_empty());
        }
    }

    #[test]
    fn exactly_one_sankhya(chart in arb_chart()) {
        let a = run(&chart);
        let n = a.yogas.iter().filter(|y| SANKHYA_NAMES.contains(&y.name())).count();
        prop_assert_eq!(n, 1);
    }

    #[test]
    fn full_and_partial_kala_sarpa_exclusive(chart in arb_chart()) {
        let a = run(&chart);
        let n = a.yogas.iter().filter(|y| y.name().contains("Kala Sarpa")).count();
        prop_assert!(n <= 1);
    }

    #[test]
    fn analysis_is_deterministic(chart in arb_chart()) {
        prop_assert_eq!(run(&chart), run(&chart));
    }

    #[test]
    fn placeholder_reason_stands_alone(chart in arb_chart()) {
        for y in run(&chart).yogas {
            if y.cancellation_reasons().iter().any(|r| r == NO_CANCELLATION) {
                prop_assert_eq!(y.cancellation_reasons().len(), 1);
            }
        }
    }
}
