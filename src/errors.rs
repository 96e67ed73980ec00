use std::io::Error as IoError;
use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

use crate::fits::FitsReadError;

/// Errors surfaced by [`crate::FitsLoader`] and its configuration.
#[derive(Error, Debug)]
pub enum FitsLoaderError {
    #[error("Failed to list directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("Error reading {}: {source}", .path.display())]
    Fits {
        path: PathBuf,
        #[source]
        source: FitsReadError,
    },

    #[error("No fits files matching '{suffix}' in directory {}", .dir.display())]
    NoMatchingFiles { dir: PathBuf, suffix: String },

    #[error("Argument {key} not found in fits header of {}", .path.display())]
    MissingHeaderKey { key: String, path: PathBuf },

    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),

    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
