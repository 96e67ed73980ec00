use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::FitsLoaderError;

pub const CONFIG_ENV_VAR: &str = "FITLOADER_CONFIG";

fn default_config_path() -> PathBuf {
    if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(p);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/fitloader/loader.toml");
    }
    PathBuf::from(".fitloader.toml")
}

/// Order in which matching directory entries are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Whatever order the platform's directory listing yields.
    #[default]
    Raw,
    /// Ascending by file name bytes.
    Sorted,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoaderConfig {
    /// Case-sensitive file name suffix a directory entry must end with.
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default)]
    pub order: ListingOrder,
}

fn default_suffix() -> String {
    ".fit".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            order: ListingOrder::default(),
        }
    }
}

impl LoaderConfig {
    pub fn path() -> PathBuf {
        default_config_path()
    }

    pub fn load() -> Result<Self, FitsLoaderError> {
        Self::load_from_path(&Self::path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, FitsLoaderError> {
        let s = fs::read_to_string(path).map_err(|source| FitsLoaderError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&s).map_err(|source| FitsLoaderError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::debug!("using default loader config: {e}");
            Self::default()
        })
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_order(mut self, order: ListingOrder) -> Self {
        self.order = order;
        self
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }
}
