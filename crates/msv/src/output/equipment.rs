//! Equipment and weapon class output formatting.

use mechsieve_catalog_rs::{ClassRule, EquipmentKind, EquipmentRecord, WeaponClass};
use serde::Serialize;

use super::helpers::{format_header, format_tons, truncate_str};

/// JSON output structure for one equipment record.
#[derive(Serialize)]
pub struct EquipmentOutput<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub kind: EquipmentKind,
    pub tonnage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_base: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_year: Option<i32>,
    pub classes: Vec<&'static str>,
}

/// JSON output structure for one weapon class.
#[derive(Serialize)]
pub struct ClassOutput {
    pub name: &'static str,
    pub rule: String,
}

fn kind_label(kind: EquipmentKind) -> &'static str {
    match kind {
        EquipmentKind::Weapon => "weapon",
        EquipmentKind::Ammo => "ammo",
        EquipmentKind::Misc => "misc",
    }
}

/// Weapon classes whose rule matches the record's display name.
pub fn classes_of(record: &EquipmentRecord) -> Vec<&'static str> {
    WeaponClass::all()
        .filter(|class| class.matches(&record.name))
        .map(WeaponClass::label)
        .collect()
}

/// Describes a class rule in words.
pub fn describe_rule(rule: &ClassRule) -> String {
    match rule {
        ClassRule::Keywords { any, none } if none.is_empty() => {
            format!("name contains {}", any.join(" / "))
        }
        ClassRule::Keywords { any, none } => format!(
            "name contains {} but not {}",
            any.join(" / "),
            none.join(" / ")
        ),
        ClassRule::Composite(members) => {
            let names: Vec<&str> = members.iter().map(|c| c.label()).collect();
            format!("any of {}", names.join(", "))
        }
    }
}

/// Formats equipment records as JSON.
pub fn format_equipment_json(records: &[&EquipmentRecord]) -> Result<String, serde_json::Error> {
    let output: Vec<EquipmentOutput> = records
        .iter()
        .map(|record| EquipmentOutput {
            key: &record.key,
            name: &record.name,
            kind: record.kind,
            tonnage: record.tonnage,
            damage: record.damage.as_deref(),
            tech_base: record.tech_base.as_deref(),
            intro_year: record.intro_year,
            classes: classes_of(record),
        })
        .collect();
    serde_json::to_string_pretty(&output)
}

/// Formats equipment records as a table.
pub fn format_equipment_table(records: &[&EquipmentRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No equipment found.\n".to_string();
    }

    let mut output = String::new();
    let header = format!(
        "{:<24} {:<28} {:<7} {:>6} {}",
        "Key", "Name", "Kind", "Tons", "Classes"
    );
    output.push_str(&format_header(&header, use_colors));

    for record in records {
        let line = format!(
            "{:<24} {:<28} {:<7} {:>6} {}",
            truncate_str(&record.key, 24),
            truncate_str(&record.name, 28),
            kind_label(record.kind),
            format_tons(record.tonnage),
            classes_of(record).join(", ")
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Formats every weapon class as JSON.
pub fn format_classes_json() -> Result<String, serde_json::Error> {
    let output: Vec<ClassOutput> = WeaponClass::all()
        .map(|class| ClassOutput {
            name: class.label(),
            rule: describe_rule(class.rule()),
        })
        .collect();
    serde_json::to_string_pretty(&output)
}

/// Formats every weapon class as a table.
pub fn format_classes_table(use_colors: bool) -> String {
    let mut output = String::new();
    let header = format!("{:<20} {}", "Class", "Matches");
    output.push_str(&format_header(&header, use_colors));

    for class in WeaponClass::all() {
        output.push_str(&format!(
            "{:<20} {}\n",
            format!("class:{}", class.label()),
            describe_rule(class.rule())
        ));
    }

    output
}
