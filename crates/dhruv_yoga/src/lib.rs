//! Yoga detection and scoring over a natal chart.
//!
//! This crate provides:
//! - Detectors for eight yoga families (Raja, Dhana, Pancha-Mahapurusha,
//!   Nabhasa, Chandra, Solar, Negative, Special)
//! - The shared strength pipeline: base strength from dignity and house,
//!   then combustion, hemming, affliction and benefic support
//! - [`analyze`], which runs all enabled families and summarises the chart
//!
//! Detectors are pure functions of a [`ChartContext`] and a [`YogaConfig`].
//! Events are emitted through `tracing`; no subscriber is installed here.

pub mod analysis;
pub mod chandra;
pub mod config;
pub mod dhana;
pub mod error;
pub mod mahapurusha;
pub mod nabhasa;
pub mod negative;
pub mod raja;
pub mod solar;
pub mod special;
pub mod strength;
pub mod types;

pub use analysis::{YogaAnalysis, analyze, analyze_sidereal, dominant_category, overall_strength};
pub use config::{FamilySet, YogaConfig};
pub use dhruv_chart::{ChartContext, ChartError, Graha, NodeAspectPolicy};
pub use error::YogaError;
pub use strength::{Cancellation, Scored, base_strength, cancellation, has_neecha_bhanga, score};
pub use types::{
    ALL_CATEGORIES, MAHAPURUSHA_MIN_STRENGTH, MAX_STRENGTH, MIN_STRENGTH, NO_CANCELLATION, Yoga,
    YogaCategory, YogaStrength,
};
