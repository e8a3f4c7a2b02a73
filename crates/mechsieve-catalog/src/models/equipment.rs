//! Equipment records.

use serde::{Deserialize, Serialize};

/// Broad kind of an equipment record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Weapon,
    Ammo,
    #[default]
    Misc,
}

/// One equipment definition from the catalog.
///
/// The `key` is what unit inventories reference; `name` is what users read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    /// Internal lookup key, e.g. `"ISMediumLaser"`.
    pub key: String,

    /// Display name, e.g. `"Medium Laser"`.
    pub name: String,

    #[serde(default)]
    pub kind: EquipmentKind,

    #[serde(default)]
    pub tonnage: f64,

    /// Damage as printed on the record sheet ("5", "2/missile", "Special").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_year: Option<i32>,
}

/// Folds an equipment key or name to its comparison form: lower-cased with all
/// whitespace removed.
///
/// `ISMediumLaser`, `IS Medium Laser` and `ismediumlaser` fold to the same text.
pub fn normalize_equipment_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl EquipmentRecord {
    /// Creates a record with only a key and a display name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind: EquipmentKind::default(),
            tonnage: 0.0,
            damage: None,
            tech_base: None,
            intro_year: None,
        }
    }
}
