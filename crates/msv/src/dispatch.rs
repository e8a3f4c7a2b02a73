//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by whether they read the unit catalog, so the catalog
//! file is only opened for commands that search or list it.

use mechsieve_catalog_rs::Catalog;

use crate::cli::{Cli, Commands, ConfigCommands, SearchArgs, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without the catalog.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read the catalog.
pub trait CatalogCommand {
    /// Execute the command against a loaded catalog.
    fn execute(&self, ctx: &CommandContext, catalog: &Catalog) -> Result<()>;
}

/// Commands that don't need the catalog.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Explain(&'a str),
    Classes,
    Build { limit: Option<usize> },
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command needs the catalog.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            Some(Commands::Explain { expr }) => Some(Self::Explain(expr)),
            Some(Commands::Classes) => Some(Self::Classes),
            Some(Commands::Build {
                search: false,
                limit,
            }) => Some(Self::Build { limit: *limit }),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Explain(expr) => commands::explain::execute(ctx, expr),
            Self::Classes => commands::classes::execute(ctx),
            Self::Build { limit } => {
                let opts = commands::build::BuildOptions {
                    search: false,
                    limit: *limit,
                };
                commands::build::execute(ctx, &opts, None)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("msv - unit catalog search");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => commands::config::execute_edit(ctx),
    }
}

/// Commands that read the catalog.
pub enum CatalogDispatch<'a> {
    Search(&'a SearchArgs),
    Show(&'a str),
    Equipment {
        query: &'a Option<String>,
        class: &'a Option<String>,
    },
    Build { limit: Option<usize> },
}

impl<'a> CatalogDispatch<'a> {
    /// Create a catalog dispatch from the CLI command.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Search(args)) => Some(Self::Search(args)),
            Some(Commands::Show { unit }) => Some(Self::Show(unit)),
            Some(Commands::Equipment { query, class }) => Some(Self::Equipment { query, class }),
            Some(Commands::Build {
                search: true,
                limit,
            }) => Some(Self::Build { limit: *limit }),
            _ => None,
        }
    }
}

impl CatalogCommand for CatalogDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, catalog: &Catalog) -> Result<()> {
        match self {
            Self::Search(args) => commands::search::execute(ctx, args, catalog),
            Self::Show(unit) => commands::show::execute(ctx, unit, catalog),
            Self::Equipment { query, class } => {
                let opts = commands::equipment::EquipmentOptions {
                    query: (*query).clone(),
                    class: (*class).clone(),
                };
                commands::equipment::execute(ctx, &opts, catalog)
            }
            Self::Build { limit } => {
                let opts = commands::build::BuildOptions {
                    search: true,
                    limit: *limit,
                };
                commands::build::execute(ctx, &opts, Some(catalog))
            }
        }
    }
}
