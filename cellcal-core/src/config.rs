//! Global cellcal configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{CellCalError, CellCalResult};
use crate::record::ValidationPolicy;

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cellcal")
        .join("properties.json")
}

fn default_provider() -> String {
    "google".to_string()
}

/// Global configuration at ~/.config/cellcal/config.toml
#[derive(Deserialize, Clone)]
pub struct GlobalConfig {
    /// Where the record property file lives.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Calendar provider binary suffix (`cellcal-provider-<name>`).
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Reject due dates that are not in the future.
    #[serde(default)]
    pub require_future_due_date: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            store_path: default_store_path(),
            provider: default_provider(),
            require_future_due_date: false,
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> CellCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CellCalError::Config("Could not determine config directory".into()))?
            .join("cellcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it doesn't exist.
    pub fn load() -> CellCalResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(GlobalConfig::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| CellCalError::Config(format!("Invalid {}: {}", path.display(), e)))
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy { require_future: self.require_future_due_date }
    }
}
