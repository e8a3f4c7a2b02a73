//! Unit records.
//!
//! A [`Unit`] is a read-only summary of one catalog entry: its scalar
//! statistics, boolean traits, categorical components, quirks and inventory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::EntityType;

/// The inventory name and quantity lists of a unit have different lengths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("inventory lists differ in length: {names} names, {quantities} quantities")]
pub struct InventoryError {
    /// Number of equipment names.
    pub names: usize,
    /// Number of equipment quantities.
    pub quantities: usize,
}

/// A validated view over a unit's inventory.
///
/// Entries are index-aligned `(name, quantity)` pairs. Names are not required
/// to be unique: the same weapon mounted in two locations appears twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inventory<'a> {
    names: &'a [String],
    quantities: &'a [u32],
}

impl<'a> Inventory<'a> {
    /// Pairs the two lists, failing if their lengths differ.
    pub fn new(names: &'a [String], quantities: &'a [u32]) -> Result<Self, InventoryError> {
        if names.len() != quantities.len() {
            return Err(InventoryError {
                names: names.len(),
                quantities: quantities.len(),
            });
        }
        Ok(Self { names, quantities })
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the inventory has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over `(name, quantity)` entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u32)> + 'a {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.quantities.iter().copied())
    }
}

/// Bay, door and unit capacity for one kind of transport bay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayCapacity {
    /// Number of bays.
    pub bays: u32,
    /// Number of bay doors.
    pub doors: u32,
    /// Number of units the bays hold.
    pub units: u32,
}

/// Transport capabilities of a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transport {
    /// Troop space in tons.
    pub troop_space: f64,
    /// Cargo capacity in tons.
    pub cargo_tons: f64,
    pub mek: BayCapacity,
    pub protomek: BayCapacity,
    pub light_vehicle: BayCapacity,
    pub heavy_vehicle: BayCapacity,
    pub battle_armor: BayCapacity,
    pub infantry: BayCapacity,
    pub aerospace_fighter: BayCapacity,
    pub small_craft: BayCapacity,
    /// Docking collars (JumpShips and WarShips).
    pub docking_collars: u32,
    /// Battle armor handles (OmniMeks and OmniVehicles).
    pub battle_armor_handles: u32,
}

/// One catalog unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    pub chassis: String,
    pub model: String,

    /// Master Unit List identifier, if the unit has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mul_id: Option<i32>,

    /// Introduction year.
    pub year: i32,
    pub tonnage: f64,
    pub battle_value: i32,
    pub walk_mp: i32,
    pub run_mp: i32,
    pub jump_mp: i32,
    pub armor_total: i32,

    /// Rules level, e.g. "Introductory", "Standard", "Advanced".
    pub tech_level: String,
    /// "Inner Sphere", "Clan" or "Mixed".
    pub tech_base: String,
    /// Rulebook or record sheet the unit was published in.
    pub source: String,

    pub engine_type: String,
    pub gyro_type: String,
    pub armor_type: String,
    pub internal_structure: String,
    pub cockpit_type: String,
    pub move_mode: String,

    /// Which unit types this record belongs to.
    pub entity_type: EntityType,

    pub omni: bool,
    pub military: bool,
    pub industrial: bool,
    pub support_vehicle: bool,
    pub doomed_on_ground: bool,
    pub doomed_in_atmosphere: bool,
    pub doomed_in_space: bool,
    pub doomed_in_vacuum: bool,
    pub doomed_in_extreme_temp: bool,
    pub doomed_in_thin_atmosphere: bool,
    pub canon: bool,
    pub official: bool,
    pub patchwork: bool,
    pub clan_engine: bool,
    pub invalid: bool,
    pub failed_to_load: bool,

    pub transport: Transport,

    /// Unit quirk names.
    pub quirks: Vec<String>,
    /// Weapon quirk names.
    pub weapon_quirks: Vec<String>,

    /// Equipment keys, index-aligned with `equipment_quantities`.
    pub equipment_names: Vec<String>,
    pub equipment_quantities: Vec<u32>,
}

impl Unit {
    /// Creates a unit with the given chassis and model and every other field defaulted.
    pub fn new(chassis: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            chassis: chassis.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Returns "chassis model", or just the chassis when the model is blank.
    pub fn display_name(&self) -> String {
        let model = self.model.trim();
        if model.is_empty() {
            self.chassis.trim().to_string()
        } else {
            format!("{} {}", self.chassis.trim(), model)
        }
    }

    /// Returns the validated inventory.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] if the name and quantity lists differ in length.
    pub fn inventory(&self) -> Result<Inventory<'_>, InventoryError> {
        Inventory::new(&self.equipment_names, &self.equipment_quantities)
    }

    /// Appends an inventory entry, keeping both lists aligned.
    pub fn with_equipment(mut self, name: impl Into<String>, quantity: u32) -> Self {
        self.equipment_names.push(name.into());
        self.equipment_quantities.push(quantity);
        self
    }
}
