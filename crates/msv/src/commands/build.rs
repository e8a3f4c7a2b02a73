//! Build command implementation.
//!
//! Assembles an equipment expression one token at a time. Each menu only
//! offers the tokens the expression builder would accept next, so the
//! finished expression always compiles.

use std::fmt;
use std::io::{self, IsTerminal};

use dialoguer::{Input, Select};
use mechsieve_catalog_rs::Catalog;
use mechsieve_filter_rs::filter::{
    parse_target, Comparison, ExpressionBuilder, ExpressionTree, Operand, Operator,
};
use owo_colors::OwoColorize;
use tracing::debug;

use super::{search, CommandContext, CommandError, Result};
use crate::cli::SearchArgs;
use crate::output::{format_expression_json, format_expression_table};

/// Options for the build command.
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Search the catalog with the finished expression.
    pub search: bool,
    /// Result limit for that search.
    pub limit: Option<usize>,
}

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Operand,
    And,
    Or,
    OpenParen,
    CloseParen,
    Undo,
    Clear,
    Done,
    Cancel,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Operand => "Add equipment or class count",
            Step::And => "AND (&)",
            Step::Or => "OR (|)",
            Step::OpenParen => "Open group (",
            Step::CloseParen => "Close group )",
            Step::Undo => "Undo last token",
            Step::Clear => "Start over",
            Step::Done => "Done",
            Step::Cancel => "Cancel",
        };
        f.write_str(label)
    }
}

/// The steps the builder accepts next, in menu order.
pub fn available_steps(builder: &ExpressionBuilder) -> Vec<Step> {
    let mut steps = Vec::new();
    if builder.can_push_operand() {
        steps.push(Step::Operand);
        steps.push(Step::OpenParen);
    }
    if builder.can_push_operator() {
        steps.push(Step::And);
        steps.push(Step::Or);
    }
    if builder.can_close_paren() {
        steps.push(Step::CloseParen);
    }
    if !builder.is_empty() {
        steps.push(Step::Undo);
        steps.push(Step::Clear);
    }
    if builder.is_complete() {
        steps.push(Step::Done);
    }
    steps.push(Step::Cancel);
    steps
}

/// Applies a step that needs no further input.
///
/// `Operand`, `Done` and `Cancel` are handled by the caller and leave the
/// builder unchanged here.
pub fn apply_step(builder: &mut ExpressionBuilder, step: Step) -> Result<()> {
    match step {
        Step::And => builder.push_operator(Operator::And)?,
        Step::Or => builder.push_operator(Operator::Or)?,
        Step::OpenParen => builder.open_paren()?,
        Step::CloseParen => builder.close_paren()?,
        Step::Undo => {
            builder.undo();
        }
        Step::Clear => builder.clear(),
        Step::Operand | Step::Done | Step::Cancel => {}
    }
    Ok(())
}

fn prompt_error(e: dialoguer::Error) -> CommandError {
    CommandError::Io(io::Error::other(e.to_string()))
}

fn prompt_operand() -> Result<Operand> {
    let target: String = Input::new()
        .with_prompt("Equipment key or class:NAME")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            parse_target(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;

    let comparisons = ["at least", "fewer than"];
    let comparison = match Select::new()
        .with_prompt("Comparison")
        .items(&comparisons)
        .default(0)
        .interact()
        .map_err(prompt_error)?
    {
        0 => Comparison::AtLeast,
        _ => Comparison::LessThan,
    };

    let quantity: u32 = Input::new()
        .with_prompt("Quantity")
        .default(1)
        .interact_text()
        .map_err(prompt_error)?;

    Ok(Operand {
        target: parse_target(&target)?,
        quantity,
        comparison,
    })
}

/// Runs the interactive menu until the user finishes or cancels.
///
/// Returns `None` on cancel.
fn run_menu(ctx: &CommandContext) -> Result<Option<ExpressionTree>> {
    let mut builder = ExpressionBuilder::new();

    loop {
        if !ctx.quiet {
            let current = if builder.is_empty() {
                "(empty)".to_string()
            } else {
                builder.render()
            };
            if ctx.use_colors {
                eprintln!("\n{} {}", "Expression:".bold(), current.cyan());
            } else {
                eprintln!("\nExpression: {current}");
            }
        }

        let steps = available_steps(&builder);
        let labels: Vec<String> = steps.iter().map(Step::to_string).collect();
        let choice = Select::new()
            .with_prompt("Next")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match steps[choice] {
            Step::Done => return Ok(Some(builder.compile()?)),
            Step::Cancel => return Ok(None),
            Step::Operand => {
                let operand = prompt_operand()?;
                builder.push_operand(operand)?;
            }
            step => apply_step(&mut builder, step)?,
        }
        debug!(tokens = builder.tokens().len(), open = builder.open_groups(), "builder updated");
    }
}

/// Executes the build command.
///
/// `catalog` is required when `opts.search` is set.
///
/// # Errors
///
/// Returns an error if stdin is not a terminal or a prompt fails.
pub fn execute(ctx: &CommandContext, opts: &BuildOptions, catalog: Option<&Catalog>) -> Result<()> {
    if !io::stdin().is_terminal() {
        return Err(CommandError::Argument(
            "build needs an interactive terminal; use 'msv explain EXPR' instead".to_string(),
        ));
    }

    let Some(tree) = run_menu(ctx)? else {
        if !ctx.quiet && !ctx.json_output {
            eprintln!("Cancelled.");
        }
        return Ok(());
    };

    match (opts.search, catalog) {
        (true, Some(catalog)) => {
            let args = SearchArgs {
                equipment: Some(tree.to_string()),
                limit: opts.limit,
                explain: true,
                ..Default::default()
            };
            search::execute(ctx, &args, catalog)
        }
        _ => {
            if ctx.json_output {
                println!("{}", format_expression_json(&tree)?);
            } else if !ctx.quiet {
                print!("{}", format_expression_table(&tree, ctx.use_colors));
            }
            Ok(())
        }
    }
}
