//! Yoga records, families, and strength tiers.

use dhruv_chart::Graha;
use serde::{Deserialize, Serialize};

/// Entry recorded when no cancellation or mitigation applies.
pub const NO_CANCELLATION: &str = "no cancellation identified";

/// Strength bounds for general yogas.
pub const MIN_STRENGTH: f64 = 10.0;
pub const MAX_STRENGTH: f64 = 100.0;
/// Lower bound for Pancha-Mahapurusha yogas.
pub const MAHAPURUSHA_MIN_STRENGTH: f64 = 30.0;

/// Yoga family, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YogaCategory {
    Raja,
    Dhana,
    Mahapurusha,
    Nabhasa,
    Chandra,
    Solar,
    Negative,
    Special,
}

/// All families in declaration order.
pub const ALL_CATEGORIES: [YogaCategory; 8] = [
    YogaCategory::Raja,
    YogaCategory::Dhana,
    YogaCategory::Mahapurusha,
    YogaCategory::Nabhasa,
    YogaCategory::Chandra,
    YogaCategory::Solar,
    YogaCategory::Negative,
    YogaCategory::Special,
];

impl YogaCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Raja => "Raja Yoga",
            Self::Dhana => "Dhana Yoga",
            Self::Mahapurusha => "Pancha Mahapurusha Yoga",
            Self::Nabhasa => "Nabhasa Yoga",
            Self::Chandra => "Chandra Yoga",
            Self::Solar => "Solar Yoga",
            Self::Negative => "Negative Yoga",
            Self::Special => "Special Yoga",
        }
    }

    /// 0-based position in [`ALL_CATEGORIES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Strength floor applied to yogas of this family.
    pub const fn min_strength(self) -> f64 {
        match self {
            Self::Mahapurusha => MAHAPURUSHA_MIN_STRENGTH,
            _ => MIN_STRENGTH,
        }
    }
}

/// Qualitative tier of a strength percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YogaStrength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    ExtremelyStrong,
}

impl YogaStrength {
    /// >=85 extremely strong, >=70 strong, >=50 moderate, >=30 weak, else very weak.
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 85.0 {
            Self::ExtremelyStrong
        } else if pct >= 70.0 {
            Self::Strong
        } else if pct >= 50.0 {
            Self::Moderate
        } else if pct >= 30.0 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::VeryWeak => "very weak",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::ExtremelyStrong => "extremely strong",
        }
    }
}

/// One detected yoga.
///
/// Built only through [`Yoga::new`], which clamps the strength to the
/// family's range and guarantees a non-empty reason list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yoga {
    category: YogaCategory,
    name: String,
    grahas: Vec<Graha>,
    houses: Vec<u8>,
    auspicious: bool,
    strength_percentage: f64,
    cancellation_reasons: Vec<String>,
}

impl Yoga {
    pub fn new(
        category: YogaCategory,
        name: impl Into<String>,
        grahas: Vec<Graha>,
        houses: Vec<u8>,
        auspicious: bool,
        strength: f64,
        mut cancellation_reasons: Vec<String>,
    ) -> Self {
        if cancellation_reasons.is_empty() {
            cancellation_reasons.push(NO_CANCELLATION.to_string());
        }
        let strength = if strength.is_finite() {
            strength
        } else {
            category.min_strength()
        };
        Self {
            category,
            name: name.into(),
            grahas,
            houses,
            auspicious,
            strength_percentage: strength.clamp(category.min_strength(), MAX_STRENGTH),
            cancellation_reasons,
        }
    }

    pub fn category(&self) -> YogaCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grahas(&self) -> &[Graha] {
        &self.grahas
    }

    pub fn houses(&self) -> &[u8] {
        &self.houses
    }

    pub fn is_auspicious(&self) -> bool {
        self.auspicious
    }

    pub fn strength_percentage(&self) -> f64 {
        self.strength_percentage
    }

    pub fn strength(&self) -> YogaStrength {
        YogaStrength::from_percentage(self.strength_percentage)
    }

    pub fn cancellation_reasons(&self) -> &[String] {
        &self.cancellation_reasons
    }

    /// True when some real cancellation or mitigation was recorded.
    pub fn is_modified(&self) -> bool {
        self.cancellation_reasons.iter().any(|r| r != NO_CANCELLATION)
    }
}
