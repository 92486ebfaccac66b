//! Configuration types for taxonkit-rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths;
use super::validation::validate_threads;
use crate::error::{TaxonKitError, TaxonKitResult};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub taxonkit: TaxonKitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxonKitConfig {
    /// taxonkit executable; a bare name is looked up on PATH
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Value for --threads; None keeps taxonkit's default
    #[serde(default)]
    pub threads: Option<usize>,
    /// Value for --data-dir; None lets taxonkit search ~/.taxonkit
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Log every taxonkit command line at INFO instead of DEBUG
    #[serde(default)]
    pub debug: bool,
}

fn default_binary() -> PathBuf {
    PathBuf::from("taxonkit")
}

impl Default for TaxonKitConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            threads: None,
            data_dir: None,
            debug: false,
        }
    }
}

impl TaxonKitConfig {
    /// Directory taxonkit will actually read the dump from
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::default_data_dir)
    }
}

impl Config {
    /// Override fields from TAXONKIT_BIN, TAXONKIT_THREADS and TAXONKIT_DATA_DIR
    pub fn apply_env(&mut self) {
        if let Ok(binary) = std::env::var("TAXONKIT_BIN") {
            self.taxonkit.binary = PathBuf::from(binary);
        }
        if let Ok(threads) = std::env::var("TAXONKIT_THREADS") {
            self.taxonkit.threads = validate_threads(&threads);
        }
        if let Ok(data_dir) = std::env::var("TAXONKIT_DATA_DIR") {
            self.taxonkit.data_dir = Some(PathBuf::from(data_dir));
        }
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load the config file at the default path if present, then apply the environment
    pub fn load_or_default() -> TaxonKitResult<Self> {
        let path = paths::default_config_path();
        let mut config = if path.exists() {
            debug!("Loading configuration from {}", path.display());
            load_config(&path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> TaxonKitResult<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| TaxonKitError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> TaxonKitResult<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| TaxonKitError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
