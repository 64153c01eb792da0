//! Graha dignity, natural friendship, and classification tables.
//!
//! Provides exaltation/debilitation signs, moolatrikona signs, own-sign
//! ownership, the natural (naisargika) friendship table, sign-level dignity
//! classification, benefic/malefic nature, and Dig Bala houses.
//!
//! All lookups are sign-level: a dignity depends only on (graha, rashi).
//!
//! Clean-room implementation from BPHS (Brihat Parashara Hora Shastra).

use serde::{Deserialize, Serialize};

use crate::graha::{Graha, rashi_lord_by_index};

// ---------------------------------------------------------------------------
// 1a. Exaltation & Debilitation
// ---------------------------------------------------------------------------

/// Exaltation rashi index for every graha, nodes included.
///
/// Sun Mesha, Moon Vrishabha, Mars Makara, Mercury Kanya, Jupiter Karka,
/// Venus Meena, Saturn Tula, Rahu Vrishabha, Ketu Vrischika.
pub const fn exaltation_sign(graha: Graha) -> u8 {
    match graha {
        Graha::Surya => 0,
        Graha::Chandra => 1,
        Graha::Mangal => 9,
        Graha::Buddh => 5,
        Graha::Guru => 3,
        Graha::Shukra => 11,
        Graha::Shani => 6,
        Graha::Rahu => 1,
        Graha::Ketu => 7,
    }
}

/// Debilitation rashi index: the sign opposite exaltation.
///
/// For the nodes this is a separate fixed entry (Rahu Vrischika, Ketu Vrishabha),
/// which happens to coincide with the opposite sign.
pub const fn debilitation_sign(graha: Graha) -> u8 {
    match graha {
        Graha::Rahu => 7,
        Graha::Ketu => 1,
        _ => (exaltation_sign(graha) + 6) % 12,
    }
}

/// Moolatrikona rashi index. Returns None for Rahu/Ketu.
///
/// Sign-level only; the classical degree ranges are not applied.
pub const fn moolatrikona_sign(graha: Graha) -> Option<u8> {
    match graha {
        Graha::Surya => Some(4),    // Simha
        Graha::Chandra => Some(1),  // Vrishabha
        Graha::Mangal => Some(0),   // Mesha
        Graha::Buddh => Some(5),    // Kanya
        Graha::Guru => Some(8),     // Dhanu
        Graha::Shukra => Some(6),   // Tula
        Graha::Shani => Some(10),   // Kumbha
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Own-sign rashi indices (0-based).
///
/// Sun [4], Moon [3], Mars [0,7], Mercury [2,5], Jupiter [8,11],
/// Venus [1,6], Saturn [9,10]. Rahu co-rules Kumbha [10], Ketu co-rules Vrischika [7].
pub const fn own_signs(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Surya => &[4],
        Graha::Chandra => &[3],
        Graha::Mangal => &[0, 7],
        Graha::Buddh => &[2, 5],
        Graha::Guru => &[8, 11],
        Graha::Shukra => &[1, 6],
        Graha::Shani => &[9, 10],
        Graha::Rahu => &[10],
        Graha::Ketu => &[7],
    }
}

// ---------------------------------------------------------------------------
// 1b. Natural Friendship (Naisargika Maitri)
// ---------------------------------------------------------------------------

/// Natural relationship between two grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NaisargikaMaitri {
    Friend,
    Enemy,
    Neutral,
}

/// Natural friendship of `graha` towards `other`.
///
/// The table is asymmetric: Sun counts Venus an enemy and Venus counts Sun
/// an enemy, but Moon has no enemies while Mercury counts Moon an enemy.
/// Always look up from the perspective of the planet being judged.
pub const fn naisargika_maitri(graha: Graha, other: Graha) -> NaisargikaMaitri {
    use Graha::*;
    use NaisargikaMaitri::*;

    match (graha, other) {
        // Sun: friends=Moon,Mars,Jupiter; enemies=Venus,Saturn
        (Surya, Chandra | Mangal | Guru) => Friend,
        (Surya, Shukra | Shani) => Enemy,

        // Moon: friends=Sun,Mercury; no enemies
        (Chandra, Surya | Buddh) => Friend,

        // Mars: friends=Sun,Moon,Jupiter; enemies=Mercury
        (Mangal, Surya | Chandra | Guru) => Friend,
        (Mangal, Buddh) => Enemy,

        // Mercury: friends=Sun,Venus; enemies=Moon
        (Buddh, Surya | Shukra) => Friend,
        (Buddh, Chandra) => Enemy,

        // Jupiter: friends=Sun,Moon,Mars; enemies=Mercury,Venus
        (Guru, Surya | Chandra | Mangal) => Friend,
        (Guru, Buddh | Shukra) => Enemy,

        // Venus: friends=Mercury,Saturn; enemies=Sun,Moon
        (Shukra, Buddh | Shani) => Friend,
        (Shukra, Surya | Chandra) => Enemy,

        // Saturn: friends=Mercury,Venus; enemies=Sun,Moon,Mars
        (Shani, Buddh | Shukra) => Friend,
        (Shani, Surya | Chandra | Mangal) => Enemy,

        // Rahu: friends=Mercury,Venus,Saturn; enemies=Sun,Moon,Mars
        (Rahu, Buddh | Shukra | Shani) => Friend,
        (Rahu, Surya | Chandra | Mangal) => Enemy,

        // Ketu: friends=Mars,Venus,Saturn; enemies=Sun,Moon
        (Ketu, Mangal | Shukra | Shani) => Friend,
        (Ketu, Surya | Chandra) => Enemy,

        _ => Neutral,
    }
}

// ---------------------------------------------------------------------------
// 1c. Dignity
// ---------------------------------------------------------------------------

/// Sign-level dignity of a graha. Exactly one applies to any (graha, rashi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    Moolatrikona,
    OwnSign,
    FriendSign,
    NeutralSign,
    EnemySign,
    Debilitated,
}

impl Dignity {
    /// Exalted, moolatrikona, or own sign.
    pub const fn is_own_or_exalted(self) -> bool {
        matches!(self, Self::Exalted | Self::Moolatrikona | Self::OwnSign)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Exalted => "Exalted",
            Self::Moolatrikona => "Moolatrikona",
            Self::OwnSign => "Own Sign",
            Self::FriendSign => "Friend Sign",
            Self::NeutralSign => "Neutral Sign",
            Self::EnemySign => "Enemy Sign",
            Self::Debilitated => "Debilitated",
        }
    }
}

pub fn is_exalted(graha: Graha, rashi_index: u8) -> bool {
    exaltation_sign(graha) == rashi_index
}

pub fn is_debilitated(graha: Graha, rashi_index: u8) -> bool {
    debilitation_sign(graha) == rashi_index
}

pub fn is_moolatrikona(graha: Graha, rashi_index: u8) -> bool {
    moolatrikona_sign(graha) == Some(rashi_index)
}

/// Own sign by rulership, including the nodes' co-rulerships.
pub fn is_own_sign(graha: Graha, rashi_index: u8) -> bool {
    own_signs(graha).contains(&rashi_index) || rashi_lord_by_index(rashi_index) == Some(graha)
}

/// The rashi's lord is a natural friend of the graha.
pub fn is_friend_sign(graha: Graha, rashi_index: u8) -> bool {
    match rashi_lord_by_index(rashi_index) {
        Some(lord) => matches!(naisargika_maitri(graha, lord), NaisargikaMaitri::Friend),
        None => false,
    }
}

/// The rashi's lord is a natural enemy of the graha.
pub fn is_enemy_sign(graha: Graha, rashi_index: u8) -> bool {
    match rashi_lord_by_index(rashi_index) {
        Some(lord) => matches!(naisargika_maitri(graha, lord), NaisargikaMaitri::Enemy),
        None => false,
    }
}

/// Classify a graha's dignity in a rashi.
///
/// Priority: exalted > debilitated > moolatrikona > own > friend > enemy > neutral.
pub fn dignity(graha: Graha, rashi_index: u8) -> Dignity {
    if is_exalted(graha, rashi_index) {
        Dignity::Exalted
    } else if is_debilitated(graha, rashi_index) {
        Dignity::Debilitated
    } else if is_moolatrikona(graha, rashi_index) {
        Dignity::Moolatrikona
    } else if is_own_sign(graha, rashi_index) {
        Dignity::OwnSign
    } else if is_friend_sign(graha, rashi_index) {
        Dignity::FriendSign
    } else if is_enemy_sign(graha, rashi_index) {
        Dignity::EnemySign
    } else {
        Dignity::NeutralSign
    }
}

// ---------------------------------------------------------------------------
// 1d. Benefic/Malefic, Dig Bala
// ---------------------------------------------------------------------------

/// Natural benefic/malefic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeneficNature {
    Benefic,
    Malefic,
}

/// Natural benefic/malefic for each graha. Moon counts as benefic.
pub const fn natural_benefic_malefic(graha: Graha) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh | Graha::Guru | Graha::Shukra => BeneficNature::Benefic,
        Graha::Surya | Graha::Mangal | Graha::Shani | Graha::Rahu | Graha::Ketu => {
            BeneficNature::Malefic
        }
    }
}

pub const fn is_natural_benefic(graha: Graha) -> bool {
    matches!(natural_benefic_malefic(graha), BeneficNature::Benefic)
}

/// House in which a graha gains directional strength. None for the nodes.
///
/// Sun/Mars 10th, Moon/Venus 4th, Mercury/Jupiter 1st, Saturn 7th.
pub const fn dig_bala_house(graha: Graha) -> Option<u8> {
    match graha {
        Graha::Surya | Graha::Mangal => Some(10),
        Graha::Chandra | Graha::Shukra => Some(4),
        Graha::Buddh | Graha::Guru => Some(1),
        Graha::Shani => Some(7),
        Graha::Rahu | Graha::Ketu => None,
    }
}

pub fn has_dig_bala(graha: Graha, house: u8) -> bool {
    dig_bala_house(graha) == Some(house)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::{ALL_GRAHAS, SAPTA_GRAHAS};

    #[test]
    fn debilitation_opposite_exaltation_for_sapta() {
        for g in SAPTA_GRAHAS {
            assert_eq!((exaltation_sign(g) + 6) % 12, debilitation_sign(g), "{g:?}");
        }
    }

    #[test]
    fn node_debilitation_entries() {
        assert_eq!(debilitation_sign(Graha::Rahu), 7);
        assert_eq!(debilitation_sign(Graha::Ketu), 1);
    }

    #[test]
    fn exalted_and_debilitated_never_overlap() {
        for g in ALL_GRAHAS {
            for r in 0..12 {
                assert!(!(is_exalted(g, r) && is_debilitated(g, r)));
            }
        }
    }

    #[test]
    fn friendship_is_asymmetric() {
        assert_eq!(
            naisargika_maitri(Graha::Surya, Graha::Shukra),
            NaisargikaMaitri::Enemy
        );
        assert_eq!(
            naisargika_maitri(Graha::Shukra, Graha::Surya),
            NaisargikaMaitri::Enemy
        );
        assert_eq!(
            naisargika_maitri(Graha::Buddh, Graha::Chandra),
            NaisargikaMaitri::Enemy
        );
        assert_eq!(
            naisargika_maitri(Graha::Chandra, Graha::Buddh),
            NaisargikaMaitri::Friend
        );
        assert_eq!(
            naisargika_maitri(Graha::Guru, Graha::Shani),
            NaisargikaMaitri::Neutral
        );
    }

    #[test]
    fn node_relationships() {
        assert_eq!(
            naisargika_maitri(Graha::Rahu, Graha::Shani),
            NaisargikaMaitri::Friend
        );
        assert_eq!(
            naisargika_maitri(Graha::Ketu, Graha::Chandra),
            NaisargikaMaitri::Enemy
        );
        assert_eq!(
            naisargika_maitri(Graha::Ketu, Graha::Buddh),
            NaisargikaMaitri::Neutral
        );
    }

    #[test]
    fn dignity_priority() {
        // Mercury in Kanya is both exalted and own: exaltation wins
        assert_eq!(dignity(Graha::Buddh, 5), Dignity::Exalted);
        // Sun in Simha is moolatrikona
        assert_eq!(dignity(Graha::Surya, 4), Dignity::Moolatrikona);
        // Mars in Vrischika is plain own sign
        assert_eq!(dignity(Graha::Mangal, 7), Dignity::OwnSign);
        // Jupiter in Mesha (Mars) is friend
        assert_eq!(dignity(Graha::Guru, 0), Dignity::FriendSign);
        // Saturn in Simha (Sun) is enemy
        assert_eq!(dignity(Graha::Shani, 4), Dignity::EnemySign);
        // Moon in Tula (Venus) is neutral
        assert_eq!(dignity(Graha::Chandra, 6), Dignity::NeutralSign);
        // Jupiter in Makara
        assert_eq!(dignity(Graha::Guru, 9), Dignity::Debilitated);
    }

    #[test]
    fn own_sign_includes_node_corulership() {
        assert!(is_own_sign(Graha::Rahu, 10));
        assert!(is_own_sign(Graha::Ketu, 7));
        assert!(!is_own_sign(Graha::Rahu, 7));
    }

    #[test]
    fn dig_bala_houses() {
        assert!(has_dig_bala(Graha::Surya, 10));
        assert!(has_dig_bala(Graha::Shani, 7));
        assert!(has_dig_bala(Graha::Guru, 1));
        assert!(!has_dig_bala(Graha::Rahu, 1));
    }

    #[test]
    fn benefic_classification() {
        assert!(is_natural_benefic(Graha::Guru));
        assert!(is_natural_benefic(Graha::Chandra));
        assert!(!is_natural_benefic(Graha::Ketu));
    }
}
