//! Equipment command implementation.
//!
//! Lists catalog equipment, optionally narrowed by text and weapon class.

use mechsieve_catalog_rs::{Catalog, EquipmentRecord, WeaponClass};
use mechsieve_filter_rs::FilterError;

use super::{CommandContext, Result};
use crate::output::{format_equipment_json, format_equipment_table};

/// Options for the equipment command.
#[derive(Debug, Default)]
pub struct EquipmentOptions {
    /// Text the key or display name must contain.
    pub query: Option<String>,
    /// Weapon class name.
    pub class: Option<String>,
}

/// Parses a weapon class name, suggesting the closest one on failure.
fn parse_class(name: &str) -> Result<WeaponClass> {
    name.parse().map_err(|_: String| {
        FilterError::unknown_value("weapon class", name, WeaponClass::all().map(WeaponClass::label))
            .into()
    })
}

/// Returns the records matching `opts`, in catalog order.
pub fn select_equipment<'a>(
    catalog: &'a Catalog,
    opts: &EquipmentOptions,
) -> Result<Vec<&'a EquipmentRecord>> {
    let class = opts.class.as_deref().map(parse_class).transpose()?;
    let needle = opts.query.as_deref().map(str::to_lowercase);

    Ok(catalog
        .equipment
        .iter()
        .filter(|record| {
            needle.as_ref().map_or(true, |needle| {
                record.key.to_lowercase().contains(needle)
                    || record.name.to_lowercase().contains(needle)
            })
        })
        .filter(|record| class.map_or(true, |class| class.matches(&record.name)))
        .collect())
}

/// Executes the equipment command.
///
/// # Errors
///
/// Returns an error if the class name is unknown.
pub fn execute(ctx: &CommandContext, opts: &EquipmentOptions, catalog: &Catalog) -> Result<()> {
    let records = select_equipment(catalog, opts)?;

    if ctx.json_output {
        println!("{}", format_equipment_json(&records)?);
    } else if !ctx.quiet {
        print!("{}", format_equipment_table(&records, ctx.use_colors));
    }

    Ok(())
}
