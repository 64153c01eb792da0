//! Natal chart model and the Vedic geometry built on top of it.
//!
//! This crate provides:
//! - Graha and Rashi enums with lordship tables
//! - A validated, immutable [`ChartContext`]
//! - Sign-level dignity classification and natural friendship
//! - Conjunction, opposition, exchange and sign-based drishti
//! - Combustion thresholds and the graded combustion factor
//!
//! Positions are supplied already resolved; no ephemeris work happens here.

pub mod aspect;
pub mod bhava;
pub mod chart;
pub mod combustion;
pub mod dignity;
pub mod error;
pub mod graha;
pub mod rashi;
pub mod util;

pub use aspect::{
    CLOSE_ORB, CONJUNCTION_ORB, EXACT_ORB, NodeAspectPolicy, WAR_ORB, are_conjunct,
    are_in_exchange, are_mutually_aspecting, aspecting_grahas, casts_drishti,
    casts_drishti_on_rashi, drishti_matrix,
};
pub use bhava::{
    DUSTHANA_HOUSES, KENDRA_HOUSES, TRIKONA_HOUSES, UPACHAYA_HOUSES, is_dusthana, is_kendra,
    is_trikona, is_upachaya, sign_distance,
};
pub use chart::{ChartContext, ChartInput, PlanetPosition};
pub use combustion::{combustion_factor, combustion_threshold, is_combust};
pub use dignity::{
    BeneficNature, Dignity, NaisargikaMaitri, dignity, is_debilitated, is_exalted,
    is_natural_benefic, is_own_sign, naisargika_maitri,
};
pub use error::ChartError;
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS, TARA_GRAHAS, rashi_lord, rashi_lord_by_index};
pub use rashi::{ALL_RASHIS, Modality, Rashi, rashi_from_longitude};
