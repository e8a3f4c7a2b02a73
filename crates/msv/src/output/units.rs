//! Unit output formatting.

use mechsieve_catalog_rs::{Catalog, Unit};
use serde::Serialize;

use crate::commands::search::SearchResult;

use super::helpers::{
    format_flag, format_header, format_label, format_mul_id, format_tons, format_unit_types,
    truncate_str,
};

/// JSON output structure for the search command.
#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub units: Vec<UnitOutput<'a>>,
    pub total: usize,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<String>,
}

/// JSON output structure for one unit in a result list.
#[derive(Serialize)]
pub struct UnitOutput<'a> {
    pub name: String,
    pub chassis: &'a str,
    pub model: &'a str,
    pub mul_id: Option<i32>,
    pub tonnage: f64,
    pub battle_value: i32,
    pub year: i32,
    pub types: Vec<&'static str>,
    pub source: &'a str,
}

impl<'a> UnitOutput<'a> {
    fn from_unit(unit: &'a Unit) -> Self {
        Self {
            name: unit.display_name(),
            chassis: &unit.chassis,
            model: &unit.model,
            mul_id: unit.mul_id,
            tonnage: unit.tonnage,
            battle_value: unit.battle_value,
            year: unit.year,
            types: unit.entity_type.types().iter().map(|t| t.as_str()).collect(),
            source: &unit.source,
        }
    }
}

/// JSON output structure for unit details (show command).
#[derive(Serialize)]
pub struct UnitDetailsOutput<'a> {
    #[serde(flatten)]
    pub summary: UnitOutput<'a>,
    pub walk_mp: i32,
    pub run_mp: i32,
    pub jump_mp: i32,
    pub armor_total: i32,
    pub tech_base: &'a str,
    pub tech_level: &'a str,
    pub engine_type: &'a str,
    pub omni: bool,
    pub quirks: &'a [String],
    pub weapon_quirks: &'a [String],
    pub equipment: Vec<InventoryEntryOutput<'a>>,
}

/// JSON output for one inventory entry.
#[derive(Serialize)]
pub struct InventoryEntryOutput<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub quantity: u32,
}

/// Formats search results as JSON.
pub fn format_search_json(result: &SearchResult<'_>) -> Result<String, serde_json::Error> {
    let output = SearchOutput {
        units: result.units.iter().map(|u| UnitOutput::from_unit(u)).collect(),
        total: result.total,
        has_more: result.has_more(),
        criteria: result.criteria.clone(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats search results as a table.
pub fn format_search_table(result: &SearchResult<'_>, use_colors: bool) -> String {
    let mut output = String::new();

    if !result.criteria.is_empty() {
        output.push_str(&format_label("Criteria:", use_colors));
        output.push('\n');
        for line in &result.criteria {
            output.push_str(&format!("  {line}\n"));
        }
        output.push('\n');
    }

    if result.units.is_empty() {
        output.push_str("No units found.\n");
        return output;
    }

    let header = format!(
        "{:<7} {:>6} {:>5} {:>5} {:<14} {}",
        "MUL", "Tons", "BV", "Year", "Type", "Unit"
    );
    output.push_str(&format_header(&header, use_colors));

    for unit in &result.units {
        let line = format!(
            "{:<7} {:>6} {:>5} {:>5} {:<14} {}",
            format_mul_id(unit.mul_id),
            format_tons(unit.tonnage),
            unit.battle_value,
            unit.year,
            truncate_str(&format_unit_types(unit), 14),
            unit.display_name()
        );
        output.push_str(&line);
        output.push('\n');
    }

    if result.has_more() {
        output.push_str(&format!(
            "\nShowing {} of {} matches (use --all to see every match).\n",
            result.units.len(),
            result.total
        ));
    }

    output
}

fn inventory_entries<'a>(unit: &'a Unit, catalog: &'a Catalog) -> Vec<InventoryEntryOutput<'a>> {
    unit.equipment_names
        .iter()
        .zip(&unit.equipment_quantities)
        .map(|(key, quantity)| InventoryEntryOutput {
            key,
            name: catalog.equipment_name(key),
            quantity: *quantity,
        })
        .collect()
}

/// Formats unit details as JSON.
pub fn format_unit_details_json(unit: &Unit, catalog: &Catalog) -> Result<String, serde_json::Error> {
    let output = UnitDetailsOutput {
        summary: UnitOutput::from_unit(unit),
        walk_mp: unit.walk_mp,
        run_mp: unit.run_mp,
        jump_mp: unit.jump_mp,
        armor_total: unit.armor_total,
        tech_base: &unit.tech_base,
        tech_level: &unit.tech_level,
        engine_type: &unit.engine_type,
        omni: unit.omni,
        quirks: &unit.quirks,
        weapon_quirks: &unit.weapon_quirks,
        equipment: inventory_entries(unit, catalog),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats unit details as a table.
pub fn format_unit_details_table(unit: &Unit, catalog: &Catalog, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        format_label("Unit:", use_colors),
        unit.display_name()
    ));
    output.push_str(&format!("MUL ID: {}\n", format_mul_id(unit.mul_id)));
    output.push_str(&format!("Type: {}\n", format_unit_types(unit)));
    output.push_str(&format!("Tonnage: {}\n", format_tons(unit.tonnage)));
    output.push_str(&format!("Battle value: {}\n", unit.battle_value));
    output.push_str(&format!("Year: {}\n", unit.year));
    output.push_str(&format!(
        "Movement: {}/{}/{}\n",
        unit.walk_mp, unit.run_mp, unit.jump_mp
    ));
    output.push_str(&format!("Armor: {}\n", unit.armor_total));
    if !unit.tech_base.is_empty() {
        output.push_str(&format!("Tech: {} {}\n", unit.tech_base, unit.tech_level));
    }
    if !unit.engine_type.is_empty() {
        output.push_str(&format!("Engine: {}\n", unit.engine_type));
    }
    output.push_str(&format!("Omni: {}\n", format_flag(unit.omni, use_colors)));
    if !unit.source.is_empty() {
        output.push_str(&format!("Source: {}\n", unit.source));
    }

    if !unit.quirks.is_empty() {
        output.push_str(&format!("Quirks: {}\n", unit.quirks.join(", ")));
    }
    if !unit.weapon_quirks.is_empty() {
        output.push_str(&format!("Weapon quirks: {}\n", unit.weapon_quirks.join(", ")));
    }

    let entries = inventory_entries(unit, catalog);
    if !entries.is_empty() {
        output.push_str(&format!("\nEquipment ({}):\n", entries.len()));
        for entry in &entries {
            output.push_str(&format!("  {:>3} x {}\n", entry.quantity, entry.name));
        }
    }
    if unit.inventory().is_err() {
        output.push_str(&format!(
            "\n(inventory is corrupt: {} names but {} quantities)\n",
            unit.equipment_names.len(),
            unit.equipment_quantities.len()
        ));
    }

    output
}
