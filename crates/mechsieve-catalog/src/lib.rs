//! Unit and equipment catalog for mechsieve.
//!
//! The catalog is a read-only snapshot of unit summaries and equipment
//! definitions. The filter core never mutates it; it only reads unit fields and
//! resolves equipment keys to display names.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod models;
pub mod store;
pub mod weapon_class;

pub use models::{
    normalize_equipment_name, BayCapacity, EntityType, EquipmentKind, EquipmentRecord, Inventory,
    InventoryError, Transport, Unit, UnitType,
};
pub use store::{CatalogStore, CatalogStoreError};
pub use weapon_class::{ClassRule, WeaponClass};

/// A loaded unit catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// When the catalog file was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    /// All units, in catalog order.
    #[serde(default)]
    pub units: Vec<Unit>,

    /// Equipment definitions.
    #[serde(default)]
    pub equipment: Vec<EquipmentRecord>,

    /// Normalized equipment key -> index into `equipment`. Not serialized.
    #[serde(skip)]
    equipment_index: HashMap<String, usize>,

    /// Normalized display name -> index into `equipment`. Not serialized.
    #[serde(skip)]
    name_index: HashMap<String, usize>,
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.generated_at == other.generated_at
            && self.units == other.units
            && self.equipment == other.equipment
    }
}

impl Catalog {
    /// Creates a catalog from units and equipment and builds its lookup index.
    pub fn new(units: Vec<Unit>, equipment: Vec<EquipmentRecord>) -> Self {
        let mut catalog = Self {
            generated_at: None,
            units,
            equipment,
            equipment_index: HashMap::new(),
            name_index: HashMap::new(),
        };
        catalog.rebuild_indexes();
        catalog
    }

    /// Rebuilds the equipment lookup indexes. Call after deserializing or editing `equipment`.
    ///
    /// When two records fold to the same key or name, the first one wins.
    pub fn rebuild_indexes(&mut self) {
        self.equipment_index.clear();
        self.name_index.clear();
        for (i, record) in self.equipment.iter().enumerate() {
            self.equipment_index
                .entry(normalize_equipment_name(&record.key))
                .or_insert(i);
            self.name_index
                .entry(normalize_equipment_name(&record.name))
                .or_insert(i);
        }
    }

    /// Looks up an equipment record by key, ignoring case and whitespace.
    pub fn equipment(&self, key: &str) -> Option<&EquipmentRecord> {
        self.equipment_index
            .get(&normalize_equipment_name(key))
            .and_then(|&i| self.equipment.get(i))
    }

    /// Looks up an equipment record by key or, failing that, by display name.
    ///
    /// Both comparisons ignore case and whitespace, so `MediumLaser`,
    /// `medium laser` and `AC/20` all find their records.
    pub fn resolve_equipment(&self, text: &str) -> Option<&EquipmentRecord> {
        let folded = normalize_equipment_name(text);
        self.equipment_index
            .get(&folded)
            .or_else(|| self.name_index.get(&folded))
            .and_then(|&i| self.equipment.get(i))
    }

    /// Resolves an equipment key to its display name, falling back to the key itself.
    pub fn equipment_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.equipment(key).map_or(key, |record| record.name.as_str())
    }

    /// Finds a unit by MUL id or by display name (case-insensitive).
    pub fn find_unit(&self, query: &str) -> Option<&Unit> {
        let query = query.trim();
        if let Ok(mul_id) = query.parse::<i32>() {
            if let Some(unit) = self.units.iter().find(|u| u.mul_id == Some(mul_id)) {
                return Some(unit);
            }
        }
        let lower = query.to_lowercase();
        self.units
            .iter()
            .find(|u| u.display_name().to_lowercase() == lower)
    }

    /// Returns units whose inventory lists are misaligned.
    pub fn invalid_inventories(&self) -> Vec<(&Unit, InventoryError)> {
        self.units
            .iter()
            .filter_map(|u| u.inventory().err().map(|e| (u, e)))
            .collect()
    }

    /// Returns true if the catalog holds no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
