//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/msv/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Search result limit when neither the flag nor the config sets one.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# msv - unit catalog search configuration

# Config schema version (do not modify)
version = 1

# Catalog file to search (can also use --catalog or MSV_CATALOG)
# catalog = "/path/to/catalog.json"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Search defaults
[search]
# limit = 50                # Results shown without --all
# parallel = false          # Evaluate units across all cores
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Catalog file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Search defaults.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            catalog: None,
            output: OutputConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Search configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default result limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Evaluate in parallel by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

impl Config {
    /// The configured result limit, or [`DEFAULT_SEARCH_LIMIT`].
    pub fn search_limit(&self) -> usize {
        self.search.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }

    /// Whether searches run in parallel by default.
    pub fn search_parallel(&self) -> bool {
        self.search.parallel.unwrap_or(false)
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/msv/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("MSV_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("msv"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("msv"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("MSV_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    debug!(path = %path.display(), version = config.version, "loaded config");
    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema; later versions add their steps here.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref catalog) = config.catalog {
                println!("  catalog: {}", catalog.display());
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }

            println!("\n[search]");
            if let Some(limit) = config.search.limit {
                println!("  limit: {}", limit);
            }
            if let Some(parallel) = config.search.parallel {
                println!("  parallel: {}", parallel);
            }
        } else {
            println!("(No config file exists. Run 'msv config edit' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config edit command.
pub fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

        if !ctx.quiet && !ctx.json_output {
            eprintln!("Created default config at: {}", path.display());
        }
    }

    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());

    debug!(path = %path.display(), %editor, "opening config in editor");

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|e| CommandError::Config(format!("Failed to open editor '{}': {}", editor, e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies one `key = value` setting to `config`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let (section, field) = match key.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, key),
    };

    match (section, field) {
        (None, "catalog") => {
            if value.trim().is_empty() {
                config.catalog = None;
            } else {
                config.catalog = Some(PathBuf::from(value));
            }
        }
        (Some("output"), "color") => {
            config.output.color = Some(parse_bool(value)?);
        }
        (Some("search"), "limit") => {
            let limit = value.trim().parse::<usize>().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid search.limit value '{}'. Use a whole number",
                    value
                ))
            })?;
            config.search.limit = Some(limit);
        }
        (Some("search"), "parallel") => {
            config.search.parallel = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: catalog, output.color, search.limit, search.parallel",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn quiet_ctx() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_bool_values() {
        for s in ["true", "True", "yes", "1", "on"] {
            assert!(parse_bool(s).unwrap(), "{s}");
        }
        for s in ["false", "FALSE", "no", "0", "off"] {
            assert!(!parse_bool(s).unwrap(), "{s}");
        }
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.catalog.is_none());
        assert!(config.output.color.is_none());
        assert_eq!(config.search_limit(), DEFAULT_SEARCH_LIMIT);
        assert!(!config.search_parallel());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1
catalog = "/data/units.json"

[output]
color = false

[search]
limit = 10
parallel = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("/data/units.json")));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.search_limit(), 10);
        assert!(config.search_parallel());
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.search.limit.is_none());
    }

    #[test]
    fn test_config_serialization_skips_unset() {
        let mut config = Config::default();
        config.search.limit = Some(5);

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("limit = 5"));
        assert!(!toml_str.contains("catalog"));
        assert!(!toml_str.contains("parallel"));
    }

    // ==================== Setting keys ====================

    #[test]
    fn test_apply_setting_known_keys() {
        let mut config = Config::default();
        apply_setting(&mut config, "catalog", "/tmp/c.json").unwrap();
        apply_setting(&mut config, "output.color", "off").unwrap();
        apply_setting(&mut config, "search.limit", "12").unwrap();
        apply_setting(&mut config, "search.parallel", "yes").unwrap();

        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.search.limit, Some(12));
        assert_eq!(config.search.parallel, Some(true));

        apply_setting(&mut config, "catalog", "").unwrap();
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            apply_setting(&mut config, "search.limit", "many"),
            Err(CommandError::Config(_))
        ));
        assert!(matches!(
            apply_setting(&mut config, "cache.enabled", "true"),
            Err(CommandError::Config(msg)) if msg.contains("Unknown config key")
        ));
        assert!(config.search.limit.is_none());
    }

    // ==================== Files ====================

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        env::set_var("MSV_CONFIG", &path);

        assert_eq!(get_config_path().unwrap(), path);
        assert_eq!(get_config_dir().unwrap(), dir.path());

        env::remove_var("MSV_CONFIG");
    }

    #[test]
    #[serial]
    fn test_set_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        env::set_var("MSV_CONFIG", &path);

        assert!(load_config().unwrap().search.limit.is_none());

        let opts = ConfigSetOptions {
            key: "search.limit".to_string(),
            value: "7".to_string(),
        };
        execute_set(&quiet_ctx(), &opts).unwrap();

        assert!(path.exists());
        let config = load_config().unwrap();
        assert_eq!(config.search_limit(), 7);
        assert_eq!(config.version, CONFIG_VERSION);

        env::remove_var("MSV_CONFIG");
    }

    #[test]
    #[serial]
    fn test_load_config_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "search = [").unwrap();
        env::set_var("MSV_CONFIG", &path);

        assert!(matches!(load_config(), Err(CommandError::Config(_))));

        env::remove_var("MSV_CONFIG");
    }
}
