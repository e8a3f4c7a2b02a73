//! Unit attributes that filter criteria can address.
//!
//! Each field enum is backed by a static name table, so the same names are
//! used by `FromStr`, `Display`, serde and the CLI.

use std::fmt;
use std::str::FromStr;

use mechsieve_catalog_rs::{BayCapacity, Unit};
use serde::{Deserialize, Serialize};

use super::error::FilterError;

fn lookup<T: Copy + PartialEq>(table: &[(T, &'static str)], field: T) -> &'static str {
    table
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, name)| *name)
        .unwrap_or_default()
}

fn parse<T: Copy>(table: &[(T, &'static str)], kind: &str, text: &str) -> Result<T, FilterError> {
    let normalized = text.trim().to_lowercase().replace(['-', ' '], "_");
    table
        .iter()
        .find(|(_, name)| *name == normalized)
        .map(|(field, _)| *field)
        .ok_or_else(|| FilterError::unknown_value(kind, text, table.iter().map(|(_, n)| *n)))
}

// ==================== Range fields ====================

/// A numeric unit attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeField {
    WalkMp,
    RunMp,
    JumpMp,
    Tonnage,
    Year,
    BattleValue,
    ArmorTotal,
    TroopSpace,
    CargoTons,
    MekBays,
    MekDoors,
    MekUnits,
    ProtomekBays,
    ProtomekDoors,
    ProtomekUnits,
    LightVehicleBays,
    LightVehicleDoors,
    LightVehicleUnits,
    HeavyVehicleBays,
    HeavyVehicleDoors,
    HeavyVehicleUnits,
    BattleArmorBays,
    BattleArmorDoors,
    BattleArmorUnits,
    InfantryBays,
    InfantryDoors,
    InfantryUnits,
    AerospaceFighterBays,
    AerospaceFighterDoors,
    AerospaceFighterUnits,
    SmallCraftBays,
    SmallCraftDoors,
    SmallCraftUnits,
    DockingCollars,
    BattleArmorHandles,
}

const RANGE_FIELDS: &[(RangeField, &str)] = &[
    (RangeField::WalkMp, "walk_mp"),
    (RangeField::RunMp, "run_mp"),
    (RangeField::JumpMp, "jump_mp"),
    (RangeField::Tonnage, "tonnage"),
    (RangeField::Year, "year"),
    (RangeField::BattleValue, "battle_value"),
    (RangeField::ArmorTotal, "armor_total"),
    (RangeField::TroopSpace, "troop_space"),
    (RangeField::CargoTons, "cargo_tons"),
    (RangeField::MekBays, "mek_bays"),
    (RangeField::MekDoors, "mek_doors"),
    (RangeField::MekUnits, "mek_units"),
    (RangeField::ProtomekBays, "protomek_bays"),
    (RangeField::ProtomekDoors, "protomek_doors"),
    (RangeField::ProtomekUnits, "protomek_units"),
    (RangeField::LightVehicleBays, "light_vehicle_bays"),
    (RangeField::LightVehicleDoors, "light_vehicle_doors"),
    (RangeField::LightVehicleUnits, "light_vehicle_units"),
    (RangeField::HeavyVehicleBays, "heavy_vehicle_bays"),
    (RangeField::HeavyVehicleDoors, "heavy_vehicle_doors"),
    (RangeField::HeavyVehicleUnits, "heavy_vehicle_units"),
    (RangeField::BattleArmorBays, "battle_armor_bays"),
    (RangeField::BattleArmorDoors, "battle_armor_doors"),
    (RangeField::BattleArmorUnits, "battle_armor_units"),
    (RangeField::InfantryBays, "infantry_bays"),
    (RangeField::InfantryDoors, "infantry_doors"),
    (RangeField::InfantryUnits, "infantry_units"),
    (RangeField::AerospaceFighterBays, "aerospace_fighter_bays"),
    (RangeField::AerospaceFighterDoors, "aerospace_fighter_doors"),
    (RangeField::AerospaceFighterUnits, "aerospace_fighter_units"),
    (RangeField::SmallCraftBays, "small_craft_bays"),
    (RangeField::SmallCraftDoors, "small_craft_doors"),
    (RangeField::SmallCraftUnits, "small_craft_units"),
    (RangeField::DockingCollars, "docking_collars"),
    (RangeField::BattleArmorHandles, "battle_armor_handles"),
];

enum BaySlot {
    Bays,
    Doors,
    Units,
}

fn bay(capacity: &BayCapacity, slot: BaySlot) -> f64 {
    f64::from(match slot {
        BaySlot::Bays => capacity.bays,
        BaySlot::Doors => capacity.doors,
        BaySlot::Units => capacity.units,
    })
}

impl RangeField {
    /// Every range field, in table order.
    pub fn all() -> impl Iterator<Item = RangeField> {
        RANGE_FIELDS.iter().map(|(field, _)| *field)
    }

    /// The field's snake_case name.
    pub fn name(self) -> &'static str {
        lookup(RANGE_FIELDS, self)
    }

    /// Reads the attribute from a unit.
    pub fn value_of(self, unit: &Unit) -> f64 {
        use BaySlot::{Bays, Doors, Units};
        let t = &unit.transport;
        match self {
            RangeField::WalkMp => f64::from(unit.walk_mp),
            RangeField::RunMp => f64::from(unit.run_mp),
            RangeField::JumpMp => f64::from(unit.jump_mp),
            RangeField::Tonnage => unit.tonnage,
            RangeField::Year => f64::from(unit.year),
            RangeField::BattleValue => f64::from(unit.battle_value),
            RangeField::ArmorTotal => f64::from(unit.armor_total),
            RangeField::TroopSpace => t.troop_space,
            RangeField::CargoTons => t.cargo_tons,
            RangeField::MekBays => bay(&t.mek, Bays),
            RangeField::MekDoors => bay(&t.mek, Doors),
            RangeField::MekUnits => bay(&t.mek, Units),
            RangeField::ProtomekBays => bay(&t.protomek, Bays),
            RangeField::ProtomekDoors => bay(&t.protomek, Doors),
            RangeField::ProtomekUnits => bay(&t.protomek, Units),
            RangeField::LightVehicleBays => bay(&t.light_vehicle, Bays),
            RangeField::LightVehicleDoors => bay(&t.light_vehicle, Doors),
            RangeField::LightVehicleUnits => bay(&t.light_vehicle, Units),
            RangeField::HeavyVehicleBays => bay(&t.heavy_vehicle, Bays),
            RangeField::HeavyVehicleDoors => bay(&t.heavy_vehicle, Doors),
            RangeField::HeavyVehicleUnits => bay(&t.heavy_vehicle, Units),
            RangeField::BattleArmorBays => bay(&t.battle_armor, Bays),
            RangeField::BattleArmorDoors => bay(&t.battle_armor, Doors),
            RangeField::BattleArmorUnits => bay(&t.battle_armor, Units),
            RangeField::InfantryBays => bay(&t.infantry, Bays),
            RangeField::InfantryDoors => bay(&t.infantry, Doors),
            RangeField::InfantryUnits => bay(&t.infantry, Units),
            RangeField::AerospaceFighterBays => bay(&t.aerospace_fighter, Bays),
            RangeField::AerospaceFighterDoors => bay(&t.aerospace_fighter, Doors),
            RangeField::AerospaceFighterUnits => bay(&t.aerospace_fighter, Units),
            RangeField::SmallCraftBays => bay(&t.small_craft, Bays),
            RangeField::SmallCraftDoors => bay(&t.small_craft, Doors),
            RangeField::SmallCraftUnits => bay(&t.small_craft, Units),
            RangeField::DockingCollars => f64::from(t.docking_collars),
            RangeField::BattleArmorHandles => f64::from(t.battle_armor_handles),
        }
    }
}

impl fmt::Display for RangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangeField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(RANGE_FIELDS, "range field", s)
    }
}

// ==================== Boolean fields ====================

/// A yes/no unit attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolField {
    Omni,
    Military,
    Industrial,
    SupportVehicle,
    DoomedOnGround,
    DoomedInAtmosphere,
    DoomedInSpace,
    DoomedInVacuum,
    DoomedInExtremeTemp,
    DoomedInThinAtmosphere,
    Canon,
    Official,
    Patchwork,
    ClanEngine,
    Invalid,
    FailedToLoad,
}

const BOOL_FIELDS: &[(BoolField, &str)] = &[
    (BoolField::Omni, "omni"),
    (BoolField::Military, "military"),
    (BoolField::Industrial, "industrial"),
    (BoolField::SupportVehicle, "support_vehicle"),
    (BoolField::DoomedOnGround, "doomed_on_ground"),
    (BoolField::DoomedInAtmosphere, "doomed_in_atmosphere"),
    (BoolField::DoomedInSpace, "doomed_in_space"),
    (BoolField::DoomedInVacuum, "doomed_in_vacuum"),
    (BoolField::DoomedInExtremeTemp, "doomed_in_extreme_temp"),
    (BoolField::DoomedInThinAtmosphere, "doomed_in_thin_atmosphere"),
    (BoolField::Canon, "canon"),
    (BoolField::Official, "official"),
    (BoolField::Patchwork, "patchwork"),
    (BoolField::ClanEngine, "clan_engine"),
    (BoolField::Invalid, "invalid"),
    (BoolField::FailedToLoad, "failed_to_load"),
];

impl BoolField {
    /// Every boolean field, in table order.
    pub fn all() -> impl Iterator<Item = BoolField> {
        BOOL_FIELDS.iter().map(|(field, _)| *field)
    }

    /// The field's snake_case name.
    pub fn name(self) -> &'static str {
        lookup(BOOL_FIELDS, self)
    }

    /// Reads the attribute from a unit.
    pub fn value_of(self, unit: &Unit) -> bool {
        match self {
            BoolField::Omni => unit.omni,
            BoolField::Military => unit.military,
            BoolField::Industrial => unit.industrial,
            BoolField::SupportVehicle => unit.support_vehicle,
            BoolField::DoomedOnGround => unit.doomed_on_ground,
            BoolField::DoomedInAtmosphere => unit.doomed_in_atmosphere,
            BoolField::DoomedInSpace => unit.doomed_in_space,
            BoolField::DoomedInVacuum => unit.doomed_in_vacuum,
            BoolField::DoomedInExtremeTemp => unit.doomed_in_extreme_temp,
            BoolField::DoomedInThinAtmosphere => unit.doomed_in_thin_atmosphere,
            BoolField::Canon => unit.canon,
            BoolField::Official => unit.official,
            BoolField::Patchwork => unit.patchwork,
            BoolField::ClanEngine => unit.clan_engine,
            BoolField::Invalid => unit.invalid,
            BoolField::FailedToLoad => unit.failed_to_load,
        }
    }
}

impl fmt::Display for BoolField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoolField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(BOOL_FIELDS, "flag", s)
    }
}

// ==================== Category fields ====================

/// A categorical unit attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    EngineType,
    GyroType,
    ArmorType,
    InternalStructure,
    CockpitType,
    TechLevel,
    TechBase,
    MoveMode,
}

const CATEGORY_FIELDS: &[(CategoryField, &str)] = &[
    (CategoryField::EngineType, "engine_type"),
    (CategoryField::GyroType, "gyro_type"),
    (CategoryField::ArmorType, "armor_type"),
    (CategoryField::InternalStructure, "internal_structure"),
    (CategoryField::CockpitType, "cockpit_type"),
    (CategoryField::TechLevel, "tech_level"),
    (CategoryField::TechBase, "tech_base"),
    (CategoryField::MoveMode, "move_mode"),
];

impl CategoryField {
    /// Every category field, in table order.
    pub fn all() -> impl Iterator<Item = CategoryField> {
        CATEGORY_FIELDS.iter().map(|(field, _)| *field)
    }

    /// The field's snake_case name.
    pub fn name(self) -> &'static str {
        lookup(CATEGORY_FIELDS, self)
    }

    /// Reads the attribute from a unit.
    pub fn value_of(self, unit: &Unit) -> &str {
        match self {
            CategoryField::EngineType => &unit.engine_type,
            CategoryField::GyroType => &unit.gyro_type,
            CategoryField::ArmorType => &unit.armor_type,
            CategoryField::InternalStructure => &unit.internal_structure,
            CategoryField::CockpitType => &unit.cockpit_type,
            CategoryField::TechLevel => &unit.tech_level,
            CategoryField::TechBase => &unit.tech_base,
            CategoryField::MoveMode => &unit.move_mode,
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(CATEGORY_FIELDS, "category field", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_name() {
        assert_eq!(RangeField::all().count(), 35);
        assert_eq!(BoolField::all().count(), 16);
        assert_eq!(CategoryField::all().count(), 8);

        for field in RangeField::all() {
            assert_eq!(field.name().parse::<RangeField>().unwrap(), field);
        }
        for field in BoolField::all() {
            assert_eq!(field.name().parse::<BoolField>().unwrap(), field);
        }
        for field in CategoryField::all() {
            assert_eq!(field.name().parse::<CategoryField>().unwrap(), field);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_separators() {
        assert_eq!("Walk-MP".parse::<RangeField>().unwrap(), RangeField::WalkMp);
        assert_eq!(
            "doomed in vacuum".parse::<BoolField>().unwrap(),
            BoolField::DoomedInVacuum
        );
    }

    #[test]
    fn test_parse_unknown_field_suggests() {
        let err = "tonage".parse::<RangeField>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown range field: tonage (did you mean 'tonnage'?)"
        );
    }

    #[test]
    fn test_serde_names_match_table() {
        let json = serde_json::to_string(&RangeField::AerospaceFighterDoors).unwrap();
        assert_eq!(json, "\"aerospace_fighter_doors\"");
        let json = serde_json::to_string(&CategoryField::InternalStructure).unwrap();
        assert_eq!(json, "\"internal_structure\"");
    }

    #[test]
    fn test_value_of() {
        let mut unit = Unit::new("Atlas", "AS7-D");
        unit.tonnage = 100.0;
        unit.walk_mp = 3;
        unit.transport.mek.doors = 2;
        unit.canon = true;
        unit.engine_type = "Fusion".to_string();

        assert_eq!(RangeField::Tonnage.value_of(&unit), 100.0);
        assert_eq!(RangeField::WalkMp.value_of(&unit), 3.0);
        assert_eq!(RangeField::MekDoors.value_of(&unit), 2.0);
        assert_eq!(RangeField::MekBays.value_of(&unit), 0.0);
        assert!(BoolField::Canon.value_of(&unit));
        assert!(!BoolField::Omni.value_of(&unit));
        assert_eq!(CategoryField::EngineType.value_of(&unit), "Fusion");
    }
}
