//! Search command implementation.
//!
//! Collects criteria from a query file and command-line flags into a
//! [`FilterDraft`], builds the filter and runs it over the catalog.

use std::fs;
use std::path::Path;

use mechsieve_catalog_rs::{Catalog, Unit};
use mechsieve_filter_rs::filter::{
    FilterDraft, FilterEvaluator, MatchMode, RangeText, TriState, UnitFilter,
};
use tracing::debug;

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::cli::{MatchModeArg, SearchArgs};
use crate::output::{format_search_json, format_search_table};

/// Matches found by a search, after the limit is applied.
#[derive(Debug)]
pub struct SearchResult<'a> {
    /// Matching units, in catalog order.
    pub units: Vec<&'a Unit>,
    /// Number of matches before the limit.
    pub total: usize,
    /// Active criteria, when requested with `--explain`.
    pub criteria: Vec<String>,
}

impl SearchResult<'_> {
    /// Returns true if the limit hid some matches.
    pub fn has_more(&self) -> bool {
        self.total > self.units.len()
    }
}

impl From<MatchModeArg> for MatchMode {
    fn from(mode: MatchModeArg) -> Self {
        match mode {
            MatchModeArg::All => MatchMode::AllOf,
            MatchModeArg::Any => MatchMode::AnyOf,
        }
    }
}

/// Executes the search command.
///
/// # Errors
///
/// Returns an error if the query file cannot be read, a criterion is
/// invalid, or a unit's inventory is corrupt.
pub fn execute(ctx: &CommandContext, args: &SearchArgs, catalog: &Catalog) -> Result<()> {
    let config = load_config()?;
    let filter = build_filter(args, catalog)?;
    let parallel = args.parallel || config.search_parallel();

    if filter.is_unconstrained() {
        debug!("no criteria given, every unit matches");
    }

    if args.count {
        let evaluator = FilterEvaluator::new(&filter);
        let total = if parallel {
            evaluator.par_filter_units(&catalog.units)?.len()
        } else {
            evaluator.count(&catalog.units)?
        };
        if ctx.json_output {
            println!("{}", serde_json::json!({ "count": total }));
        } else if !ctx.quiet {
            println!("{total}");
        }
        return Ok(());
    }

    let limit = if args.all {
        None
    } else {
        Some(args.limit.unwrap_or_else(|| config.search_limit()))
    };

    let mut result = run_search(&filter, &catalog.units, limit, parallel)?;
    if ctx.verbose {
        eprintln!(
            "Matched {} of {} units{}",
            result.total,
            catalog.units.len(),
            if parallel { " (parallel)" } else { "" }
        );
    }
    if args.explain {
        result.criteria = filter.active_criteria();
    }

    if ctx.json_output {
        println!("{}", format_search_json(&result)?);
    } else if !ctx.quiet {
        print!("{}", format_search_table(&result, ctx.use_colors));
    }

    Ok(())
}

/// Builds the filter for `args`, checking equipment keys against the catalog.
pub fn build_filter(args: &SearchArgs, catalog: &Catalog) -> Result<UnitFilter> {
    let mut filter = build_draft(args)?.build()?;
    if filter.check_equipment() {
        filter.equipment_mut().resolve_keys(catalog)?;
    }
    Ok(filter)
}

/// Runs `filter` over `units`, keeping at most `limit` matches.
pub fn run_search<'a>(
    filter: &UnitFilter,
    units: &'a [Unit],
    limit: Option<usize>,
    parallel: bool,
) -> Result<SearchResult<'a>> {
    let evaluator = FilterEvaluator::new(filter);
    let mut matched = if parallel {
        evaluator.par_filter_units(units)?
    } else {
        evaluator.filter_units(units)?
    };

    let total = matched.len();
    if let Some(limit) = limit {
        matched.truncate(limit);
    }
    debug!(total, shown = matched.len(), parallel, "search finished");

    Ok(SearchResult {
        units: matched,
        total,
        criteria: Vec::new(),
    })
}

/// Loads a TOML query file into a draft.
pub fn load_query(path: &Path) -> Result<FilterDraft> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| CommandError::Query {
        path: path.to_path_buf(),
        source,
    })
}

/// Merges the query file (if any) and every flag into one draft.
///
/// Flags override the query file for the same field or value.
pub fn build_draft(args: &SearchArgs) -> Result<FilterDraft> {
    let mut draft = match &args.query {
        Some(path) => load_query(path)?,
        None => FilterDraft::default(),
    };

    for arg in &args.range {
        let (field, text) = parse_range_arg(arg)?;
        draft.ranges.insert(field.to_string(), text);
    }

    for flag in &args.is {
        draft.flags.insert(flag.clone(), TriState::Include);
    }
    for flag in &args.is_not {
        draft.flags.insert(flag.clone(), TriState::Exclude);
    }

    for unit_type in &args.unit_type {
        draft.unit_types.insert(unit_type.clone(), TriState::Include);
    }
    for unit_type in &args.not_type {
        draft.unit_types.insert(unit_type.clone(), TriState::Exclude);
    }

    for arg in &args.include {
        let (field, value) = parse_assignment("--include", arg)?;
        draft
            .categories
            .entry(field.to_string())
            .or_default()
            .set(value, TriState::Include);
    }
    for arg in &args.exclude {
        let (field, value) = parse_assignment("--exclude", arg)?;
        draft
            .categories
            .entry(field.to_string())
            .or_default()
            .set(value, TriState::Exclude);
    }

    for quirk in &args.quirk {
        draft.quirks.selection.set(quirk, TriState::Include);
    }
    for quirk in &args.no_quirk {
        draft.quirks.selection.set(quirk, TriState::Exclude);
    }
    if let Some(mode) = args.quirk_mode {
        draft.quirks.include_mode = mode.into();
    }
    if let Some(mode) = args.no_quirk_mode {
        draft.quirks.exclude_mode = mode.into();
    }

    for quirk in &args.weapon_quirk {
        draft.weapon_quirks.selection.set(quirk, TriState::Include);
    }
    for quirk in &args.no_weapon_quirk {
        draft.weapon_quirks.selection.set(quirk, TriState::Exclude);
    }
    if let Some(mode) = args.weapon_quirk_mode {
        draft.weapon_quirks.include_mode = mode.into();
    }
    if let Some(mode) = args.no_weapon_quirk_mode {
        draft.weapon_quirks.exclude_mode = mode.into();
    }

    if let Some(source) = &args.source {
        draft.source = source.clone();
    }
    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(mul_id) = &args.mul_id {
        draft.mul_id = mul_id.clone();
    }
    if let Some(equipment) = &args.equipment {
        draft.equipment = equipment.clone();
    }
    if args.no_equipment_check {
        draft.check_equipment = false;
    }

    Ok(draft)
}

/// Splits `FIELD=VALUE`.
fn parse_assignment<'a>(flag: &str, arg: &'a str) -> Result<(&'a str, &'a str)> {
    match arg.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() && !value.trim().is_empty() => {
            Ok((field.trim(), value.trim()))
        }
        _ => Err(CommandError::Argument(format!(
            "expected FIELD=VALUE for {flag}, got '{arg}'"
        ))),
    }
}

/// Splits `FIELD=LO:HI`. A single number `FIELD=N` sets both bounds.
fn parse_range_arg(arg: &str) -> Result<(&str, RangeText)> {
    let (field, bounds) = parse_assignment("--range", arg)?;
    let text = match bounds.split_once(':') {
        Some((low, high)) => RangeText::new(low.trim(), high.trim()),
        None => RangeText::new(bounds, bounds),
    };
    Ok((field, text))
}
