//! Show command implementation.
//!
//! Displays one unit, with inventory keys resolved to catalog display names.

use mechsieve_catalog_rs::{Catalog, Unit};

use super::{CommandContext, CommandError, Result};
use crate::output::{format_unit_details_json, format_unit_details_table};

/// Finds a unit by MUL id or display name.
pub fn find_unit<'a>(catalog: &'a Catalog, query: &str) -> Result<&'a Unit> {
    catalog
        .find_unit(query)
        .ok_or_else(|| CommandError::NotFound(format!("no unit matches '{}'", query.trim())))
}

/// Executes the show command.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no unit has the given name or MUL id.
pub fn execute(ctx: &CommandContext, query: &str, catalog: &Catalog) -> Result<()> {
    let unit = find_unit(catalog, query)?;

    if ctx.json_output {
        println!("{}", format_unit_details_json(unit, catalog)?);
    } else if !ctx.quiet {
        print!("{}", format_unit_details_table(unit, catalog, ctx.use_colors));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut atlas = Unit::new("Atlas", "AS7-D");
        atlas.mul_id = Some(140);
        Catalog::new(vec![atlas, Unit::new("Locust", "LCT-1V")], Vec::new())
    }

    #[test]
    fn test_find_unit_by_name_or_id() {
        let catalog = catalog();
        assert_eq!(find_unit(&catalog, "140").unwrap().chassis, "Atlas");
        assert_eq!(find_unit(&catalog, " LOCUST LCT-1V ").unwrap().chassis, "Locust");
    }

    #[test]
    fn test_find_unit_not_found() {
        match find_unit(&catalog(), "Marauder MAD-3R") {
            Err(CommandError::NotFound(msg)) => assert_eq!(msg, "no unit matches 'Marauder MAD-3R'"),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
