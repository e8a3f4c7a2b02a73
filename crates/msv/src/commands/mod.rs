//! Command implementations for the msv CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod build;
pub mod classes;
pub mod completions;
pub mod config;
pub mod equipment;
pub mod explain;
pub mod search;
pub mod show;

use std::path::PathBuf;

use mechsieve_catalog_rs::{Catalog, CatalogStore, CatalogStoreError};
use tracing::debug;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter construction or evaluation error.
    #[error("filter error: {0}")]
    Filter(#[from] mechsieve_filter_rs::FilterError),

    /// Catalog file error.
    #[error("catalog error: {0}")]
    CatalogStore(#[from] CatalogStoreError),

    /// A unit or other catalog entry was not found.
    #[error("{0}")]
    NotFound(String),

    /// A query file could not be parsed.
    #[error("invalid query file '{path}': {source}")]
    Query {
        /// The query file.
        path: PathBuf,
        /// The TOML parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A command-line argument could not be interpreted.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are on unless `--no-color` is given, `NO_COLOR` is set, or the
    /// config file turns them off.
    pub fn from_cli(cli: &Cli) -> Self {
        let configured = config::load_config()
            .ok()
            .and_then(|config| config.output.color)
            .unwrap_or(true);
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none() && configured,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

/// Resolves the catalog path with priority: flag > config > data directory.
pub fn resolve_catalog_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.catalog {
        return Ok(path.clone());
    }
    if let Some(path) = config::load_config()?.catalog {
        return Ok(path);
    }
    Ok(CatalogStore::default_path()?)
}

/// Loads the catalog the command line points at.
///
/// A missing file is a `CatalogStoreError::ReadError`, not an empty catalog.
pub fn load_catalog(cli: &Cli) -> Result<Catalog> {
    let path = resolve_catalog_path(cli)?;
    debug!(path = %path.display(), "loading catalog");
    Ok(CatalogStore::with_path(path).load()?)
}
