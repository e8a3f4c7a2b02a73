//! Explain command implementation.
//!
//! Compiles an equipment expression and prints its normalized form and tree.

use mechsieve_filter_rs::filter::{tokenize, ExpressionBuilder, ExpressionTree};

use super::{CommandContext, Result};
use crate::output::{format_expression_json, format_expression_table};

/// Compiles `expr` the same way `search --equipment` does.
pub fn compile_expression(expr: &str) -> Result<ExpressionTree> {
    let builder = ExpressionBuilder::from_tokens(tokenize(expr)?)?;
    Ok(builder.compile()?)
}

/// Executes the explain command.
///
/// # Errors
///
/// Returns an error if the expression does not lex or compile.
pub fn execute(ctx: &CommandContext, expr: &str) -> Result<()> {
    let tree = compile_expression(expr)?;

    if ctx.json_output {
        println!("{}", format_expression_json(&tree)?);
    } else if !ctx.quiet {
        print!("{}", format_expression_table(&tree, ctx.use_colors));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;
    use mechsieve_filter_rs::FilterError;

    #[test]
    fn test_compile_normalizes() {
        let tree = compile_expression("2 MediumLaser and (1 SRM6 or 1 class:lrm)").unwrap();
        assert_eq!(tree.to_string(), "2 MediumLaser & (1 SRM6 | 1 class:lrm)");
    }

    #[test]
    fn test_compile_empty_is_unconstrained() {
        assert!(compile_expression("   ").unwrap().is_empty());
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            compile_expression("2 MediumLaser &"),
            Err(CommandError::Filter(FilterError::MalformedExpression { .. }))
        ));
        assert!(matches!(
            compile_expression("& 2 MediumLaser"),
            Err(CommandError::Filter(FilterError::RejectedToken { .. }))
        ));
        assert!(matches!(
            compile_expression("1 class:missles"),
            Err(CommandError::Filter(FilterError::UnknownValue { .. }))
        ));
    }
}
