//! House (bhava) groupings and sign-distance counting.
//!
//! Houses are 1-based (1..=12). Sign distance counts inclusively, so a sign
//! is at distance 1 from itself and the opposite sign is at distance 7.
//!
//! Clean-room implementation from standard Vedic jyotish texts (BPHS).

/// Angular houses.
pub const KENDRA_HOUSES: [u8; 4] = [1, 4, 7, 10];
/// Trine houses.
pub const TRIKONA_HOUSES: [u8; 3] = [1, 5, 9];
/// Difficult houses.
pub const DUSTHANA_HOUSES: [u8; 3] = [6, 8, 12];
/// Growth houses.
pub const UPACHAYA_HOUSES: [u8; 4] = [3, 6, 10, 11];
/// Kendras and trikonas together; the "good" houses for base strength.
pub const FAVOURABLE_HOUSES: [u8; 6] = [1, 4, 5, 7, 9, 10];

pub const fn is_kendra(house: u8) -> bool {
    matches!(house, 1 | 4 | 7 | 10)
}

pub const fn is_trikona(house: u8) -> bool {
    matches!(house, 1 | 5 | 9)
}

pub const fn is_dusthana(house: u8) -> bool {
    matches!(house, 6 | 8 | 12)
}

pub const fn is_upachaya(house: u8) -> bool {
    matches!(house, 3 | 6 | 10 | 11)
}

/// Inclusive sign distance from `from_rashi` to `to_rashi` (0-based indices), in 1..=12.
///
/// `((to - from) mod 12) + 1`.
pub const fn sign_distance(from_rashi: u8, to_rashi: u8) -> u8 {
    ((to_rashi as i16 - from_rashi as i16).rem_euclid(12) + 1) as u8
}

/// House that precedes `house`, wrapping 1 → 12.
pub const fn previous_house(house: u8) -> u8 {
    if house <= 1 { 12 } else { house - 1 }
}

/// House that follows `house`, wrapping 12 → 1.
pub const fn next_house(house: u8) -> u8 {
    if house >= 12 { 1 } else { house + 1 }
}

/// Whole-sign house of a rashi given the ascendant rashi.
pub const fn whole_sign_house(ascendant_rashi: u8, rashi: u8) -> u8 {
    sign_distance(ascendant_rashi, rashi)
}

/// House containing `longitude`, given 12 cusps (cusp `i` opens house `i + 1`).
///
/// Cusps may wrap through 0 deg. Returns None when no cusp arc contains the
/// point, which only happens for degenerate cusp tables.
pub fn house_of_longitude(cusps: &[f64; 12], longitude: f64) -> Option<u8> {
    use crate::util::forward_arc;
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let span = forward_arc(start, end);
        if span > 0.0 && forward_arc(start, longitude) < span {
            return Some(i as u8 + 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_distance_is_inclusive_and_cyclic() {
        assert_eq!(sign_distance(0, 0), 1);
        assert_eq!(sign_distance(0, 6), 7);
        assert_eq!(sign_distance(11, 0), 2);
        assert_eq!(sign_distance(0, 11), 12);
        assert_eq!(sign_distance(5, 1), 9);
    }

    #[test]
    fn house_groups() {
        assert!(KENDRA_HOUSES.iter().all(|&h| is_kendra(h)));
        assert!(TRIKONA_HOUSES.iter().all(|&h| is_trikona(h)));
        assert!(DUSTHANA_HOUSES.iter().all(|&h| is_dusthana(h)));
        assert!(UPACHAYA_HOUSES.iter().all(|&h| is_upachaya(h)));
        assert!(!is_kendra(5));
        assert!(!is_dusthana(7));
    }

    #[test]
    fn neighbours_wrap() {
        assert_eq!(previous_house(1), 12);
        assert_eq!(next_house(12), 1);
        assert_eq!(previous_house(7), 6);
        assert_eq!(next_house(7), 8);
    }

    #[test]
    fn house_from_equal_cusps() {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = (330.0 + 30.0 * i as f64) % 360.0;
        }
        assert_eq!(house_of_longitude(&cusps, 335.0), Some(1));
        assert_eq!(house_of_longitude(&cusps, 5.0), Some(2));
        assert_eq!(house_of_longitude(&cusps, 329.9), Some(12));
    }

    #[test]
    fn degenerate_cusps_have_no_house() {
        assert_eq!(house_of_longitude(&[0.0; 12], 10.0), None);
    }
}
