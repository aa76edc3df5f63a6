//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::binary::DEFAULT_DATA_FILE;
use crate::error::{Error, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Environment variable overriding [`Config::phonedata`].
pub const DATA_FILE_ENV: &str = "PHONEDATA_FILE";

/// Configuration loaded from YAML.
///
/// ```yaml
/// phonedata: /var/lib/phonedata/phone.dat
/// area_code: "021"
/// area_codes: /var/lib/phonedata/area_codes.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the binary data file
    pub phonedata: PathBuf,
    /// Reference area code used to tag results as local
    pub area_code: String,
    /// Optional JSON area code table for fixed-line numbers
    pub area_codes: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            phonedata: PathBuf::from(DEFAULT_DATA_FILE),
            area_code: String::new(),
            area_codes: None,
        }
    }
}

impl Config {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a file.
    ///
    /// Read and parse failures are both reported as [`Error::Config`] naming
    /// the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is absent.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply environment overrides.
    pub fn with_env(mut self) -> Self {
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            self.phonedata = PathBuf::from(path);
        }
        self
    }
}
