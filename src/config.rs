use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Env var naming the config file when `--config` is not given
pub const CONFIG_ENV: &str = "ROSTER_CONFIG";

/// Settings read from `roster.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    pub data_dir: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub seed: Option<u64>,
}

impl RosterConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn bind(&self) -> String {
        self.bind.clone().unwrap_or_else(|| "0.0.0.0".to_string())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8080)
    }

    /// Fixed seed for reproducible `generate` runs; the HTTP service ignores it
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

pub fn read_config(path: &Path) -> Result<RosterConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster config at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse roster config at {}", path.display()))
}

/// Loads the explicit path, else `$ROSTER_CONFIG`, else `roster.toml` if present,
/// else defaults
pub fn load_config(explicit: Option<&Path>) -> Result<RosterConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return read_config(Path::new(&path));
    }
    let default_path = Path::new("roster.toml");
    if default_path.exists() {
        return read_config(default_path);
    }
    Ok(RosterConfig::default())
}
