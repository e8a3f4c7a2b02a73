//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the msv CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// msv - Search a unit catalog by stats, tags and equipment
#[derive(Parser, Debug)]
#[command(name = "msv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Catalog file to search (default: from config, then the data directory)
    #[arg(long, global = true, env = "MSV_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog for units matching every given criterion
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Compile an equipment expression and print its tree
    Explain {
        /// Equipment expression (e.g., "2 MediumLaser & (1 SRM6 | 1 class:lrm)")
        expr: String,
    },

    /// Build an equipment expression interactively, one token at a time
    Build {
        /// Search the catalog with the finished expression
        #[arg(long)]
        search: bool,

        /// Limit results when searching
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show details for one unit
    Show {
        /// Unit name ("Atlas AS7-D") or MUL id
        unit: String,
    },

    /// List catalog equipment
    #[command(alias = "eq")]
    Equipment {
        /// Only list equipment whose key or name contains this text
        query: Option<String>,

        /// Only list equipment in a weapon class (e.g., "missile")
        #[arg(short, long)]
        class: Option<String>,
    },

    /// List weapon classes usable as "class:NAME" in expressions
    Classes,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Criteria for the search command.
///
/// Flags are applied on top of `--query FILE` when both are given.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Load criteria from a TOML query file
    #[arg(long, value_name = "FILE")]
    pub query: Option<PathBuf>,

    /// Equipment expression (e.g., "2 MediumLaser & <1 class:missile")
    #[arg(short, long, value_name = "EXPR")]
    pub equipment: Option<String>,

    /// Numeric range, either bound may be empty (e.g., "tonnage=20:55", "year=:3050")
    #[arg(short, long, value_name = "FIELD=LO:HI")]
    pub range: Vec<String>,

    /// Require a flag to be set (e.g., "omni")
    #[arg(long = "is", value_name = "FLAG")]
    pub is: Vec<String>,

    /// Require a flag to be clear
    #[arg(long = "is-not", value_name = "FLAG")]
    pub is_not: Vec<String>,

    /// Include a unit type (any listed type matches)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub unit_type: Vec<String>,

    /// Exclude a unit type
    #[arg(long = "not-type", value_name = "TYPE")]
    pub not_type: Vec<String>,

    /// Allow only listed values of a category (e.g., "engine_type=Fusion")
    #[arg(long, value_name = "FIELD=VALUE")]
    pub include: Vec<String>,

    /// Reject a value of a category
    #[arg(long, value_name = "FIELD=VALUE")]
    pub exclude: Vec<String>,

    /// Require a unit quirk
    #[arg(long, value_name = "QUIRK")]
    pub quirk: Vec<String>,

    /// Reject a unit quirk
    #[arg(long = "no-quirk", value_name = "QUIRK")]
    pub no_quirk: Vec<String>,

    /// Whether required quirks must all be present or just one
    #[arg(long, value_enum)]
    pub quirk_mode: Option<MatchModeArg>,

    /// Whether rejected quirks must all be present to reject or just one
    #[arg(long = "no-quirk-mode", value_enum)]
    pub no_quirk_mode: Option<MatchModeArg>,

    /// Require a weapon quirk
    #[arg(long, value_name = "QUIRK")]
    pub weapon_quirk: Vec<String>,

    /// Reject a weapon quirk
    #[arg(long = "no-weapon-quirk", value_name = "QUIRK")]
    pub no_weapon_quirk: Vec<String>,

    /// Match mode for required weapon quirks
    #[arg(long, value_enum)]
    pub weapon_quirk_mode: Option<MatchModeArg>,

    /// Match mode for rejected weapon quirks
    #[arg(long = "no-weapon-quirk-mode", value_enum)]
    pub no_weapon_quirk_mode: Option<MatchModeArg>,

    /// Source must contain every word
    #[arg(long)]
    pub source: Option<String>,

    /// Unit name must contain every word
    #[arg(short, long)]
    pub name: Option<String>,

    /// Exact MUL id
    #[arg(long)]
    pub mul_id: Option<String>,

    /// Skip the equipment expression
    #[arg(long)]
    pub no_equipment_check: bool,

    /// Limit results (default: from config, then 50)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show all matches (no limit)
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Print only the number of matches
    #[arg(long)]
    pub count: bool,

    /// Evaluate units across all cores
    #[arg(long)]
    pub parallel: bool,

    /// Print the active criteria before the results
    #[arg(long)]
    pub explain: bool,
}

/// Quirk list match modes
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchModeArg {
    /// Every listed quirk
    All,
    /// At least one listed quirk
    Any,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration (default)
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Key (catalog, output.color, search.limit, search.parallel)
        key: String,

        /// Value
        value: String,
    },

    /// Open the config file in $EDITOR
    Edit,
}
