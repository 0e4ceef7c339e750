//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod items;
pub mod scan;

use std::path::Path;

use tracing::debug;

use homeops_core::EngineConfig;

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EngineConfig> {
    if let Some(path) = config_path {
        return Ok(EngineConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(EngineConfig::from_file(&default_path)?)
    } else {
        Ok(EngineConfig::default())
    }
}
