//! Config command - inspect and edit the engine configuration file.
//!
//! Keys are dotted paths into the JSON form of [`EngineConfig`], e.g.
//! `collections.recent_days`. Only existing keys can be set.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use homeops_core::EngineConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Where to write it (default: --config or the user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, e.g. "warranty.expiring_soon_days"
    Get { key: String },

    /// Change one value; the value is parsed as JSON, falling back to a string
    Set { key: String, value: String },

    /// Print which file is in use
    Path,
}

/// `<user config dir>/homeops/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homeops")
        .join("config.json")
}

/// The file `--config` names, or the default location.
pub fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_config_path(config_path);

    match args.command {
        ConfigCommand::Show => {
            let file = ConfigFile::open(&path)?;
            if !file.exists {
                eprintln!(
                    "{} No config file at {}, showing defaults.",
                    style("ℹ").blue(),
                    path.display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&file.config)?);
        }
        ConfigCommand::Init { output, force } => {
            let target = output.unwrap_or(path);
            if target.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    target.display()
                );
            }
            ConfigFile::defaults(target.clone()).write()?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                target.display()
            );
        }
        ConfigCommand::Get { key } => {
            let value = ConfigFile::open(&path)?.lookup(&key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ConfigCommand::Set { key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            let mut file = ConfigFile::open(&path)?;
            file.assign(&key, value.clone())?;
            file.write()?;
            println!(
                "{} Set {} = {} in {}",
                style("✓").green(),
                key,
                value,
                path.display()
            );
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'homeops config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

/// A configuration file, loaded or defaulted.
struct ConfigFile {
    path: PathBuf,
    config: EngineConfig,
    exists: bool,
}

impl ConfigFile {
    fn defaults(path: PathBuf) -> Self {
        Self {
            path,
            config: EngineConfig::default(),
            exists: false,
        }
    }

    fn open(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::defaults(path.to_path_buf()));
        }
        debug!("Reading config from {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            config: EngineConfig::from_file(path)?,
            exists: true,
        })
    }

    fn lookup(&self, key: &str) -> anyhow::Result<Value> {
        let json = serde_json::to_value(&self.config)?;
        json.pointer(&pointer(key))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
    }

    fn assign(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut json = serde_json::to_value(&self.config)?;
        let slot = json
            .pointer_mut(&pointer(key))
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
        *slot = value;

        let config: EngineConfig = serde_json::from_value(json)
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
        check(&config).map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

        self.config = config;
        Ok(())
    }

    fn write(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.config.save(&self.path)?;
        Ok(())
    }
}

fn pointer(key: &str) -> String {
    key.split('.').map(|part| format!("/{}", part)).collect()
}

fn check(config: &EngineConfig) -> Result<(), String> {
    if config.extraction.product_min_len >= config.extraction.product_max_len {
        return Err("product_min_len must be below product_max_len".to_string());
    }
    if config.warranty.expiring_soon_days < 0 || config.collections.recent_days < 0 {
        return Err("day thresholds must not be negative".to_string());
    }
    if config.warranty.alert_offsets_days.iter().any(|d| *d < 0) {
        return Err("alert offsets must not be negative".to_string());
    }
    Ok(())
}
