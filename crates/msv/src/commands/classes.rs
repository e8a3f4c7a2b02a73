//! Classes command implementation.
//!
//! Lists the weapon classes usable as `class:NAME` operands.

use super::{CommandContext, Result};
use crate::output::{format_classes_json, format_classes_table};

/// Executes the classes command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_classes_json()?);
    } else if !ctx.quiet {
        print!("{}", format_classes_table(ctx.use_colors));
    }
    Ok(())
}
