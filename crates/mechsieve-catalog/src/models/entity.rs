//! Entity-type bits.
//!
//! Every unit carries a bitmask naming the concrete types it belongs to. A
//! quad mek, for example, carries both the generic [`EntityType::MEK`] bit and
//! the [`EntityType::QUAD_MEK`] bit, so a filter on "any mek" and a filter on
//! "quad meks" both see it.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bitmask of [`UnitType`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(u64);

impl EntityType {
    /// No bits set.
    pub const NONE: EntityType = EntityType(0);

    pub const MEK: EntityType = EntityType(1 << 0);
    pub const BIPED_MEK: EntityType = EntityType(1 << 1);
    pub const QUAD_MEK: EntityType = EntityType(1 << 2);
    pub const TRIPOD_MEK: EntityType = EntityType(1 << 3);
    pub const LAND_AIR_MEK: EntityType = EntityType(1 << 4);
    pub const QUADVEE: EntityType = EntityType(1 << 5);
    pub const PROTOMEK: EntityType = EntityType(1 << 6);
    pub const TANK: EntityType = EntityType(1 << 7);
    pub const VTOL: EntityType = EntityType(1 << 8);
    pub const SUPPORT_TANK: EntityType = EntityType(1 << 9);
    pub const SUPPORT_VTOL: EntityType = EntityType(1 << 10);
    pub const GUN_EMPLACEMENT: EntityType = EntityType(1 << 11);
    pub const BATTLE_ARMOR: EntityType = EntityType(1 << 12);
    pub const INFANTRY: EntityType = EntityType(1 << 13);
    pub const AEROSPACE_FIGHTER: EntityType = EntityType(1 << 14);
    pub const CONVENTIONAL_FIGHTER: EntityType = EntityType(1 << 15);
    pub const FIXED_WING_SUPPORT: EntityType = EntityType(1 << 16);
    pub const SMALL_CRAFT: EntityType = EntityType(1 << 17);
    pub const DROPSHIP: EntityType = EntityType(1 << 18);
    pub const JUMPSHIP: EntityType = EntityType(1 << 19);
    pub const WARSHIP: EntityType = EntityType(1 << 20);
    pub const SPACE_STATION: EntityType = EntityType(1 << 21);
    pub const HANDHELD_WEAPON: EntityType = EntityType(1 << 22);

    /// Creates a mask from raw bits.
    pub const fn from_bits(bits: u64) -> Self {
        EntityType(bits)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if any bit of `other` is also set in `self`.
    pub const fn intersects(self, other: EntityType) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    pub const fn contains(self, other: EntityType) -> bool {
        self.0 & other.0 == other.0
    }

    /// Builds a mask from a list of unit types.
    pub fn from_types(types: &[UnitType]) -> Self {
        types
            .iter()
            .fold(EntityType::NONE, |mask, t| mask | t.entity_type())
    }

    /// Returns the unit types whose bit is set, in declaration order.
    pub fn types(self) -> Vec<UnitType> {
        UnitType::ALL
            .iter()
            .copied()
            .filter(|t| self.contains(t.entity_type()))
            .collect()
    }
}

impl BitOr for EntityType {
    type Output = EntityType;

    fn bitor(self, rhs: EntityType) -> EntityType {
        EntityType(self.0 | rhs.0)
    }
}

impl BitOrAssign for EntityType {
    fn bitor_assign(&mut self, rhs: EntityType) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for EntityType {
    type Output = EntityType;

    fn bitand(self, rhs: EntityType) -> EntityType {
        EntityType(self.0 & rhs.0)
    }
}

/// A concrete unit type, each owning one [`EntityType`] bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitType {
    Mek,
    BipedMek,
    QuadMek,
    TripodMek,
    LandAirMek,
    Quadvee,
    Protomek,
    Tank,
    Vtol,
    SupportTank,
    SupportVtol,
    GunEmplacement,
    BattleArmor,
    Infantry,
    AerospaceFighter,
    ConventionalFighter,
    FixedWingSupport,
    SmallCraft,
    Dropship,
    Jumpship,
    Warship,
    SpaceStation,
    HandheldWeapon,
}

impl UnitType {
    /// Every unit type, in bit order.
    pub const ALL: [UnitType; 23] = [
        UnitType::Mek,
        UnitType::BipedMek,
        UnitType::QuadMek,
        UnitType::TripodMek,
        UnitType::LandAirMek,
        UnitType::Quadvee,
        UnitType::Protomek,
        UnitType::Tank,
        UnitType::Vtol,
        UnitType::SupportTank,
        UnitType::SupportVtol,
        UnitType::GunEmplacement,
        UnitType::BattleArmor,
        UnitType::Infantry,
        UnitType::AerospaceFighter,
        UnitType::ConventionalFighter,
        UnitType::FixedWingSupport,
        UnitType::SmallCraft,
        UnitType::Dropship,
        UnitType::Jumpship,
        UnitType::Warship,
        UnitType::SpaceStation,
        UnitType::HandheldWeapon,
    ];

    /// Returns the bit owned by this type.
    pub const fn entity_type(self) -> EntityType {
        match self {
            UnitType::Mek => EntityType::MEK,
            UnitType::BipedMek => EntityType::BIPED_MEK,
            UnitType::QuadMek => EntityType::QUAD_MEK,
            UnitType::TripodMek => EntityType::TRIPOD_MEK,
            UnitType::LandAirMek => EntityType::LAND_AIR_MEK,
            UnitType::Quadvee => EntityType::QUADVEE,
            UnitType::Protomek => EntityType::PROTOMEK,
            UnitType::Tank => EntityType::TANK,
            UnitType::Vtol => EntityType::VTOL,
            UnitType::SupportTank => EntityType::SUPPORT_TANK,
            UnitType::SupportVtol => EntityType::SUPPORT_VTOL,
            UnitType::GunEmplacement => EntityType::GUN_EMPLACEMENT,
            UnitType::BattleArmor => EntityType::BATTLE_ARMOR,
            UnitType::Infantry => EntityType::INFANTRY,
            UnitType::AerospaceFighter => EntityType::AEROSPACE_FIGHTER,
            UnitType::ConventionalFighter => EntityType::CONVENTIONAL_FIGHTER,
            UnitType::FixedWingSupport => EntityType::FIXED_WING_SUPPORT,
            UnitType::SmallCraft => EntityType::SMALL_CRAFT,
            UnitType::Dropship => EntityType::DROPSHIP,
            UnitType::Jumpship => EntityType::JUMPSHIP,
            UnitType::Warship => EntityType::WARSHIP,
            UnitType::SpaceStation => EntityType::SPACE_STATION,
            UnitType::HandheldWeapon => EntityType::HANDHELD_WEAPON,
        }
    }

    /// Returns the kebab-case identifier used in query files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            UnitType::Mek => "mek",
            UnitType::BipedMek => "biped-mek",
            UnitType::QuadMek => "quad-mek",
            UnitType::TripodMek => "tripod-mek",
            UnitType::LandAirMek => "land-air-mek",
            UnitType::Quadvee => "quadvee",
            UnitType::Protomek => "protomek",
            UnitType::Tank => "tank",
            UnitType::Vtol => "vtol",
            UnitType::SupportTank => "support-tank",
            UnitType::SupportVtol => "support-vtol",
            UnitType::GunEmplacement => "gun-emplacement",
            UnitType::BattleArmor => "battle-armor",
            UnitType::Infantry => "infantry",
            UnitType::AerospaceFighter => "aerospace-fighter",
            UnitType::ConventionalFighter => "conventional-fighter",
            UnitType::FixedWingSupport => "fixed-wing-support",
            UnitType::SmallCraft => "small-craft",
            UnitType::Dropship => "dropship",
            UnitType::Jumpship => "jumpship",
            UnitType::Warship => "warship",
            UnitType::SpaceStation => "space-station",
            UnitType::HandheldWeapon => "handheld-weapon",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        UnitType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown unit type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_owns_a_distinct_bit() {
        let mut seen = EntityType::NONE;
        for t in UnitType::ALL {
            let bit = t.entity_type();
            assert_eq!(bit.bits().count_ones(), 1, "{t} should own one bit");
            assert!(!seen.intersects(bit), "{t} shares a bit");
            seen |= bit;
        }
    }

    #[test]
    fn test_from_types_and_back() {
        let mask = EntityType::from_types(&[UnitType::Mek, UnitType::QuadMek]);
        assert!(mask.contains(EntityType::MEK));
        assert!(mask.contains(EntityType::QUAD_MEK));
        assert!(!mask.intersects(EntityType::TANK));
        assert_eq!(mask.types(), vec![UnitType::Mek, UnitType::QuadMek]);
    }

    #[test]
    fn test_unit_type_from_str() {
        assert_eq!("quad-mek".parse::<UnitType>(), Ok(UnitType::QuadMek));
        assert_eq!("Battle_Armor".parse::<UnitType>(), Ok(UnitType::BattleArmor));
        assert!("zeppelin".parse::<UnitType>().is_err());
    }

    #[test]
    fn test_entity_type_serializes_as_bits() {
        let mask = EntityType::MEK | EntityType::BIPED_MEK;
        assert_eq!(serde_json::to_string(&mask).unwrap(), "3");
        let back: EntityType = serde_json::from_str("3").unwrap();
        assert_eq!(back, mask);
    }
}
