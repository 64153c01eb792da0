//! Full-chart analysis: runs every enabled family and summarises the result.

use dhruv_chart::ChartContext;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::YogaConfig;
use crate::error::YogaError;
use crate::types::{ALL_CATEGORIES, Yoga, YogaCategory};
use crate::{chandra, dhana, mahapurusha, nabhasa, negative, raja, solar, special};

/// Overall strength reported when no auspicious yoga fired.
pub const NEUTRAL_STRENGTH: f64 = 50.0;
/// Discount applied to the overall strength per inauspicious yoga.
pub const INAUSPICIOUS_DISCOUNT: f64 = 0.1;

type Detector = fn(&ChartContext, &YogaConfig) -> Vec<Yoga>;

fn detector(category: YogaCategory) -> Detector {
    match category {
        YogaCategory::Raja => raja::detect,
        YogaCategory::Dhana => dhana::detect,
        YogaCategory::Mahapurusha => mahapurusha::detect,
        YogaCategory::Nabhasa => nabhasa::detect,
        YogaCategory::Chandra => chandra::detect,
        YogaCategory::Solar => solar::detect,
        YogaCategory::Negative => negative::detect,
        YogaCategory::Special => special::detect,
    }
}

/// Result of a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaAnalysis {
    pub yogas: Vec<Yoga>,
    pub dominant_category: Option<YogaCategory>,
    pub overall_strength: f64,
}

/// Detect all yogas in the chart.
///
/// Families run in declaration order; disabled families are skipped.
pub fn analyze(chart: &ChartContext, config: &YogaConfig) -> YogaAnalysis {
    let mut yogas = Vec::new();
    for category in ALL_CATEGORIES {
        if !config.families.is_enabled(category) {
            debug!(family = category.name(), "skipped");
            continue;
        }
        let found = detector(category)(chart, config);
        debug!(family = category.name(), count = found.len(), "family evaluated");
        for y in &found {
            trace!(
                name = y.name(),
                strength = y.strength_percentage(),
                auspicious = y.is_auspicious(),
                "yoga"
            );
        }
        yogas.extend(found);
    }

    let dominant_category = dominant_category(&yogas);
    let overall_strength = overall_strength(&yogas);
    YogaAnalysis {
        yogas,
        dominant_category,
        overall_strength,
    }
}

/// Build a whole-sign chart and analyse it.
pub fn analyze_sidereal(
    ascendant_longitude: f64,
    longitudes: [f64; 9],
    speeds: [f64; 9],
    config: &YogaConfig,
) -> Result<YogaAnalysis, YogaError> {
    config.validate().map_err(YogaError::InvalidConfig)?;
    let chart = ChartContext::from_sidereal(ascendant_longitude, longitudes, speeds)?;
    Ok(analyze(&chart, config))
}

/// Family with the most yogas; ties go to the earlier family.
pub fn dominant_category(yogas: &[Yoga]) -> Option<YogaCategory> {
    let mut counts = [0usize; ALL_CATEGORIES.len()];
    for y in yogas {
        counts[y.category().index()] += 1;
    }
    let mut best: Option<(YogaCategory, usize)> = None;
    for category in ALL_CATEGORIES {
        let n = counts[category.index()];
        if n > 0 && best.is_none_or(|(_, m)| n > m) {
            best = Some((category, n));
        }
    }
    best.map(|(c, _)| c)
}

/// `avg(auspicious) * (1 - 0.1 * inauspicious)`, clamped to [0, 100].
pub fn overall_strength(yogas: &[Yoga]) -> f64 {
    let (good, bad): (Vec<&Yoga>, Vec<&Yoga>) = yogas.iter().partition(|y| y.is_auspicious());
    if good.is_empty() {
        return NEUTRAL_STRENGTH;
    }
    let avg = good.iter().map(|y| y.strength_percentage()).sum::<f64>() / good.len() as f64;
    (avg * (1.0 - INAUSPICIOUS_DISCOUNT * bad.len() as f64)).clamp(0.0, 100.0)
}

impl YogaAnalysis {
    pub fn by_category(&self, category: YogaCategory) -> impl Iterator<Item = &Yoga> {
        self.yogas.iter().filter(move |y| y.category() == category)
    }

    /// Highest-strength auspicious yoga. The first wins on ties.
    pub fn strongest_auspicious(&self) -> Option<&Yoga> {
        self.yogas
            .iter()
            .filter(|y| y.is_auspicious())
            .fold(None, |best: Option<&Yoga>, y| match best {
                Some(b) if b.strength_percentage() >= y.strength_percentage() => Some(b),
                _ => Some(y),
            })
    }

    /// Highest-severity inauspicious yoga. The first wins on ties.
    pub fn most_challenging(&self) -> Option<&Yoga> {
        self.yogas
            .iter()
            .filter(|y| !y.is_auspicious())
            .fold(None, |best: Option<&Yoga>, y| match best {
                Some(b) if b.strength_percentage() >= y.strength_percentage() => Some(b),
                _ => Some(y),
            })
    }

    /// (auspicious, inauspicious) counts.
    pub fn summary_counts(&self) -> (usize, usize) {
        let good = self.yogas.iter().filter(|y| y.is_auspicious()).count();
        (good, self.yogas.len() - good)
    }

    /// Any yoga whose name contains `fragment`.
    pub fn has_named(&self, fragment: &str) -> bool {
        self.yogas.iter().any(|y| y.name().contains(fragment))
    }

    pub fn has_raja_yoga(&self) -> bool {
        self.by_category(YogaCategory::Raja).next().is_some()
    }

    pub fn has_dhana_yoga(&self) -> bool {
        self.by_category(YogaCategory::Dhana).next().is_some()
    }

    pub fn has_mahapurusha_yoga(&self) -> bool {
        self.by_category(YogaCategory::Mahapurusha).next().is_some()
    }

    pub fn has_gaja_kesari_yoga(&self) -> bool {
        self.has_named("Gaja-Kesari")
    }

    /// Full or partial Kala Sarpa, on either side of the nodal axis.
    pub fn has_kala_sarpa_yoga(&self) -> bool {
        self.has_named("Kala Sarpa")
    }
}
