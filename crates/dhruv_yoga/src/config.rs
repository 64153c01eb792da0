//! Configuration for yoga detection.

use dhruv_chart::{CLOSE_ORB, CONJUNCTION_ORB, EXACT_ORB, NodeAspectPolicy, WAR_ORB};
use serde::{Deserialize, Serialize};

use crate::types::YogaCategory;

/// Per-family on/off switches. All families are enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilySet {
    pub raja: bool,
    pub dhana: bool,
    pub mahapurusha: bool,
    pub nabhasa: bool,
    pub chandra: bool,
    pub solar: bool,
    pub negative: bool,
    pub special: bool,
}

impl Default for FamilySet {
    fn default() -> Self {
        Self {
            raja: true,
            dhana: true,
            mahapurusha: true,
            nabhasa: true,
            chandra: true,
            solar: true,
            negative: true,
            special: true,
        }
    }
}

impl FamilySet {
    /// Only the given family enabled.
    pub fn only(category: YogaCategory) -> Self {
        let mut set = Self {
            raja: false,
            dhana: false,
            mahapurusha: false,
            nabhasa: false,
            chandra: false,
            solar: false,
            negative: false,
            special: false,
        };
        *set.flag_mut(category) = true;
        set
    }

    pub fn is_enabled(&self, category: YogaCategory) -> bool {
        match category {
            YogaCategory::Raja => self.raja,
            YogaCategory::Dhana => self.dhana,
            YogaCategory::Mahapurusha => self.mahapurusha,
            YogaCategory::Nabhasa => self.nabhasa,
            YogaCategory::Chandra => self.chandra,
            YogaCategory::Solar => self.solar,
            YogaCategory::Negative => self.negative,
            YogaCategory::Special => self.special,
        }
    }

    fn flag_mut(&mut self, category: YogaCategory) -> &mut bool {
        match category {
            YogaCategory::Raja => &mut self.raja,
            YogaCategory::Dhana => &mut self.dhana,
            YogaCategory::Mahapurusha => &mut self.mahapurusha,
            YogaCategory::Nabhasa => &mut self.nabhasa,
            YogaCategory::Chandra => &mut self.chandra,
            YogaCategory::Solar => &mut self.solar,
            YogaCategory::Negative => &mut self.negative,
            YogaCategory::Special => &mut self.special,
        }
    }
}

/// Tunables for a detection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YogaConfig {
    /// Rahu/Ketu aspect rule for the shared strength pipeline and detectors.
    pub node_aspects: NodeAspectPolicy,
    /// Rahu/Ketu aspect rule inside the Mahapurusha strength formula.
    pub mahapurusha_node_aspects: NodeAspectPolicy,
    /// General conjunction orb (default 8 deg).
    pub conjunction_orb: f64,
    /// Close conjunction orb, e.g. Budha-Aditya (default 6 deg).
    pub close_orb: f64,
    /// Exact conjunction orb, e.g. Kala Sarpa breakers (default 3 deg).
    pub exact_orb: f64,
    /// Planetary war orb (default 1 deg).
    pub war_orb: f64,
    /// Orb for Rahu conjunction yogas: Guru-Chandal, Angarak, Shrapit (default 10 deg).
    pub node_orb: f64,
    /// Orb for Grahan yogas (default 12 deg).
    pub eclipse_orb: f64,
    pub families: FamilySet,
}

impl Default for YogaConfig {
    fn default() -> Self {
        Self {
            node_aspects: NodeAspectPolicy::JupiterLike,
            mahapurusha_node_aspects: NodeAspectPolicy::SaturnLike,
            conjunction_orb: CONJUNCTION_ORB,
            close_orb: CLOSE_ORB,
            exact_orb: EXACT_ORB,
            war_orb: WAR_ORB,
            node_orb: 10.0,
            eclipse_orb: 12.0,
            families: FamilySet::default(),
        }
    }
}

impl YogaConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        let orbs = [
            (self.conjunction_orb, "conjunction_orb must be in (0, 180]"),
            (self.close_orb, "close_orb must be in (0, 180]"),
            (self.exact_orb, "exact_orb must be in (0, 180]"),
            (self.war_orb, "war_orb must be in (0, 180]"),
            (self.node_orb, "node_orb must be in (0, 180]"),
            (self.eclipse_orb, "eclipse_orb must be in (0, 180]"),
        ];
        for (orb, msg) in orbs {
            if !orb.is_finite() || orb <= 0.0 || orb > 180.0 {
                return Err(msg);
            }
        }
        Ok(())
    }
}
