//! Immutable natal chart snapshot.
//!
//! A [`ChartContext`] holds one [`PlanetPosition`] per graha, the ascendant,
//! a house-cusp table, and the 12 resolved house lords. It is validated once
//! at construction; afterwards every lookup is infallible.

use serde::{Deserialize, Serialize};

use crate::bhava::{sign_distance, whole_sign_house};
use crate::error::ChartError;
use crate::graha::{ALL_GRAHAS, Graha, nth_rashi_from, rashi_lord_by_index};
use crate::rashi::{Rashi, rashi_index_of};
use crate::util::{angular_separation, normalize_360};

/// Allowed deviation of the Rahu-Ketu axis from exactly 180 degrees.
pub const NODE_AXIS_TOLERANCE: f64 = 0.01;

/// Resolved position of one graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub graha: Graha,
    /// Sidereal longitude in [0, 360).
    pub longitude: f64,
    /// 0-based rashi index, `floor(longitude / 30)`.
    pub rashi_index: u8,
    /// House 1..=12.
    pub house: u8,
    pub is_retrograde: bool,
    /// Daily motion in degrees; negative when retrograde.
    pub speed: f64,
}

impl PlanetPosition {
    /// Build a position, deriving the rashi from the longitude.
    pub fn new(graha: Graha, longitude: f64, house: u8, is_retrograde: bool, speed: f64) -> Self {
        Self {
            graha,
            longitude,
            rashi_index: rashi_index_of(longitude),
            house,
            is_retrograde,
            speed,
        }
    }

    pub fn rashi(&self) -> Rashi {
        // rashi_index is validated to 0..12 by ChartContext
        Rashi::from_index(self.rashi_index).unwrap_or(Rashi::Mesha)
    }

    /// Degrees elapsed within the occupied sign.
    pub fn degrees_in_rashi(&self) -> f64 {
        self.longitude - self.rashi_index as f64 * 30.0
    }
}

/// Wire shape of a chart, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartInput {
    pub ascendant_longitude: f64,
    pub positions: Vec<PlanetPosition>,
    pub house_cusps: [f64; 12],
}

/// Validated, immutable chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChartInput", into = "ChartInput")]
pub struct ChartContext {
    ascendant_longitude: f64,
    positions: [PlanetPosition; 9],
    house_cusps: [f64; 12],
    house_lords: [Graha; 12],
}

impl ChartContext {
    /// Validate and build a chart from externally resolved positions.
    ///
    /// Positions may arrive in any order; they are stored by graha index.
    pub fn new(
        ascendant_longitude: f64,
        positions: &[PlanetPosition],
        house_cusps: [f64; 12],
    ) -> Result<Self, ChartError> {
        if !ascendant_longitude.is_finite() {
            return Err(ChartError::InvalidAscendant(ascendant_longitude));
        }
        if positions.len() != 9 {
            return Err(ChartError::PlanetCount(positions.len()));
        }

        let mut slots: [Option<PlanetPosition>; 9] = [None; 9];
        for p in positions {
            validate_position(p)?;
            let slot = &mut slots[p.graha.index() as usize];
            if slot.is_some() {
                return Err(ChartError::DuplicateGraha(p.graha));
            }
            *slot = Some(*p);
        }

        let mut ordered = [positions[0]; 9];
        for (i, slot) in slots.iter().enumerate() {
            // 9 inputs with no duplicates fill all 9 slots
            match slot {
                Some(p) => ordered[i] = *p,
                None => return Err(ChartError::PlanetCount(positions.len())),
            }
        }

        let separation = angular_separation(
            ordered[Graha::Rahu.index() as usize].longitude,
            ordered[Graha::Ketu.index() as usize].longitude,
        );
        if (separation - 180.0).abs() > NODE_AXIS_TOLERANCE {
            return Err(ChartError::NodeAxis { separation });
        }

        if let Some(i) = house_cusps.iter().position(|c| !c.is_finite()) {
            return Err(ChartError::InvalidCusp(i));
        }

        let house_lords = resolve_house_lords(rashi_index_of(ascendant_longitude))?;

        Ok(Self {
            ascendant_longitude,
            positions: ordered,
            house_cusps,
            house_lords,
        })
    }

    /// Build a whole-sign chart from 9 sidereal longitudes in `ALL_GRAHAS` order.
    ///
    /// Longitudes are normalized to [0, 360). Houses are counted from the
    /// ascendant sign and cusps are placed at the start of each sign.
    /// A negative speed marks the graha retrograde.
    pub fn from_sidereal(
        ascendant_longitude: f64,
        longitudes: [f64; 9],
        speeds: [f64; 9],
    ) -> Result<Self, ChartError> {
        if !ascendant_longitude.is_finite() {
            return Err(ChartError::InvalidAscendant(ascendant_longitude));
        }
        let asc_rashi = rashi_index_of(ascendant_longitude);

        let mut positions = Vec::with_capacity(9);
        for graha in ALL_GRAHAS {
            let i = graha.index() as usize;
            if !longitudes[i].is_finite() {
                return Err(ChartError::InvalidLongitude {
                    graha,
                    value: longitudes[i],
                });
            }
            let lon = normalize_360(longitudes[i]);
            let house = whole_sign_house(asc_rashi, rashi_index_of(lon));
            positions.push(PlanetPosition::new(graha, lon, house, speeds[i] < 0.0, speeds[i]));
        }

        let mut cusps = [0.0; 12];
        for (h, cusp) in cusps.iter_mut().enumerate() {
            *cusp = nth_rashi_from(asc_rashi, h as u8 + 1) as f64 * 30.0;
        }

        Self::new(ascendant_longitude, &positions, cusps)
    }

    pub fn ascendant_longitude(&self) -> f64 {
        self.ascendant_longitude
    }

    /// 0-based rashi index of the ascendant (Lagna).
    pub fn ascendant_rashi(&self) -> u8 {
        rashi_index_of(self.ascendant_longitude)
    }

    /// All 9 positions in `ALL_GRAHAS` order.
    pub fn positions(&self) -> &[PlanetPosition; 9] {
        &self.positions
    }

    pub fn position(&self, graha: Graha) -> &PlanetPosition {
        &self.positions[graha.index() as usize]
    }

    pub fn house_cusps(&self) -> &[f64; 12] {
        &self.house_cusps
    }

    /// Lord of a 1-based house. None outside 1..=12.
    pub fn lord_of_house(&self, house: u8) -> Option<Graha> {
        if !(1..=12).contains(&house) {
            return None;
        }
        Some(self.house_lords[house as usize - 1])
    }

    /// Position of the lord of a 1-based house.
    pub fn lord_position(&self, house: u8) -> Option<&PlanetPosition> {
        self.lord_of_house(house).map(|g| self.position(g))
    }

    /// Positions occupying a 1-based house.
    pub fn occupants(&self, house: u8) -> impl Iterator<Item = &PlanetPosition> {
        self.positions.iter().filter(move |p| p.house == house)
    }

    /// Positions at the given sign distance from a reference graha.
    pub fn at_distance_from(
        &self,
        reference: Graha,
        distance: u8,
    ) -> impl Iterator<Item = &PlanetPosition> {
        let from = self.position(reference).rashi_index;
        self.positions
            .iter()
            .filter(move |p| p.graha != reference && sign_distance(from, p.rashi_index) == distance)
    }

    /// Sign distance of `graha` counted from `reference` (1..=12).
    pub fn distance_between(&self, reference: Graha, graha: Graha) -> u8 {
        sign_distance(
            self.position(reference).rashi_index,
            self.position(graha).rashi_index,
        )
    }
}

impl TryFrom<ChartInput> for ChartContext {
    type Error = ChartError;

    fn try_from(input: ChartInput) -> Result<Self, Self::Error> {
        Self::new(input.ascendant_longitude, &input.positions, input.house_cusps)
    }
}

impl From<ChartContext> for ChartInput {
    fn from(chart: ChartContext) -> Self {
        Self {
            ascendant_longitude: chart.ascendant_longitude,
            positions: chart.positions.to_vec(),
            house_cusps: chart.house_cusps,
        }
    }
}

fn validate_position(p: &PlanetPosition) -> Result<(), ChartError> {
    if !p.longitude.is_finite() || !(0.0..360.0).contains(&p.longitude) {
        return Err(ChartError::InvalidLongitude {
            graha: p.graha,
            value: p.longitude,
        });
    }
    let expected = rashi_index_of(p.longitude);
    if p.rashi_index != expected {
        return Err(ChartError::SignMismatch {
            graha: p.graha,
            expected,
            found: p.rashi_index,
        });
    }
    if !(1..=12).contains(&p.house) {
        return Err(ChartError::InvalidHouse {
            graha: p.graha,
            house: p.house,
        });
    }
    Ok(())
}

fn resolve_house_lords(ascendant_rashi: u8) -> Result<[Graha; 12], ChartError> {
    let mut lords = [Graha::Surya; 12];
    for (i, lord) in lords.iter_mut().enumerate() {
        let house = i as u8 + 1;
        *lord = rashi_lord_by_index(nth_rashi_from(ascendant_rashi, house))
            .ok_or(ChartError::HouseLord(house))?;
    }
    Ok(lords)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // Sun, Moon, Mars, Mercury, Jupiter, Venus, Saturn, Rahu, Ketu
    const LONS: [f64; 9] = [10.0, 95.0, 200.0, 25.0, 250.0, 340.0, 300.0, 60.0, 240.0];

    fn sample() -> ChartContext {
        ChartContext::from_sidereal(5.0, LONS, [1.0; 9]).unwrap()
    }

    #[test]
    fn from_sidereal_uses_whole_signs() {
        let chart = sample();
        assert_eq!(chart.ascendant_rashi(), 0);
        assert_eq!(chart.position(Graha::Surya).house, 1);
        assert_eq!(chart.position(Graha::Chandra).house, 4);
        assert_eq!(chart.position(Graha::Shukra).house, 12);
        assert!((chart.house_cusps()[1] - 30.0).abs() < EPS);
    }

    #[test]
    fn house_lords_follow_ascendant() {
        let chart = sample();
        assert_eq!(chart.lord_of_house(1), Some(Graha::Mangal));
        assert_eq!(chart.lord_of_house(4), Some(Graha::Chandra));
        assert_eq!(chart.lord_of_house(9), Some(Graha::Guru));
        assert_eq!(chart.lord_of_house(12), Some(Graha::Guru));
        assert_eq!(chart.lord_of_house(0), None);
        assert_eq!(chart.lord_of_house(13), None);
    }

    #[test]
    fn negative_speed_marks_retrograde() {
        let mut speeds = [1.0; 9];
        speeds[Graha::Shani.index() as usize] = -0.05;
        let chart = ChartContext::from_sidereal(5.0, LONS, speeds).unwrap();
        assert!(chart.position(Graha::Shani).is_retrograde);
        assert!(!chart.position(Graha::Guru).is_retrograde);
    }

    #[test]
    fn rejects_wrong_count() {
        let chart = sample();
        let err = ChartContext::new(5.0, &chart.positions()[..8], [0.0; 12]).unwrap_err();
        assert_eq!(err, ChartError::PlanetCount(8));
    }

    #[test]
    fn rejects_duplicate() {
        let chart = sample();
        let mut ps = chart.positions().to_vec();
        ps[1] = ps[0];
        let err = ChartContext::new(5.0, &ps, [0.0; 12]).unwrap_err();
        assert_eq!(err, ChartError::DuplicateGraha(Graha::Surya));
    }

    #[test]
    fn rejects_broken_node_axis() {
        let mut lons = LONS;
        lons[8] = 245.0;
        let err = ChartContext::from_sidereal(5.0, lons, [1.0; 9]).unwrap_err();
        assert!(matches!(err, ChartError::NodeAxis { .. }));
    }

    #[test]
    fn rejects_bad_house_and_sign() {
        let chart = sample();
        let mut ps = chart.positions().to_vec();
        ps[2].house = 0;
        assert!(matches!(
            ChartContext::new(5.0, &ps, [0.0; 12]),
            Err(ChartError::InvalidHouse { house: 0, .. })
        ));

        let mut ps = chart.positions().to_vec();
        ps[2].rashi_index = 3;
        assert!(matches!(
            ChartContext::new(5.0, &ps, [0.0; 12]),
            Err(ChartError::SignMismatch { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_input() {
        let mut lons = LONS;
        lons[0] = f64::NAN;
        assert!(ChartContext::from_sidereal(5.0, lons, [1.0; 9]).is_err());
        assert!(ChartContext::from_sidereal(f64::INFINITY, LONS, [1.0; 9]).is_err());
    }

    #[test]
    fn positions_are_reordered_by_graha() {
        let chart = sample();
        let mut ps = chart.positions().to_vec();
        ps.reverse();
        let again = ChartContext::new(5.0, &ps, *chart.house_cusps()).unwrap();
        assert_eq!(again, chart);
    }

    #[test]
    fn distance_queries() {
        let chart = sample();
        // Moon in Karka, Mars in Tula: 4th from Moon
        assert_eq!(chart.distance_between(Graha::Chandra, Graha::Mangal), 4);
        let fourth: Vec<_> = chart
            .at_distance_from(Graha::Chandra, 4)
            .map(|p| p.graha)
            .collect();
        assert_eq!(fourth, vec![Graha::Mangal]);
        assert_eq!(chart.occupants(1).count(), 2);
    }
}
