//! Catalog record types.

mod entity;
mod equipment;
mod unit;

pub use entity::{EntityType, UnitType};
pub use equipment::{normalize_equipment_name, EquipmentKind, EquipmentRecord};
pub use unit::{BayCapacity, Inventory, InventoryError, Transport, Unit};
