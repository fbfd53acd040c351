use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::profile::DEFAULT_PROFILE_VERSION;

/// Configuration for ism-oscal, loaded from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Structural parser defaults
    pub parser: ParserConfig,
    /// Profile generator defaults
    pub profiles: ProfileConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Where the XML tree is written when `--xmlout` is not given
    pub xml_out: PathBuf,
    /// Where the baseline catalog is written when `--catalog` is not given
    pub catalog_out: PathBuf,
    /// UTC offset appended to the metadata `modified` timestamp
    pub utc_offset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Baselines file read when `--baselines` is not given
    pub baselines: PathBuf,
    /// Profile version string when `--version` is not given
    pub version: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            xml_out: PathBuf::from("output.xml"),
            catalog_out: PathBuf::from("output.json"),
            utc_offset: "+10:00".to_string(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            baselines: PathBuf::from("baselines.json"),
            version: DEFAULT_PROFILE_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from the config directory when none is given.
    ///
    /// A missing default file yields the built-in defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Parse a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get the path to the default config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ism-oscal").join("config.toml"))
    }
}
