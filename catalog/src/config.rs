//! Catalog configuration module.
//!
//! This module provides configuration loading for the catalog binary from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `CATALOG_SEED_FILE`: JSON file of items to load at startup (optional)
//! - `CATALOG_LOAD_SAMPLE_DATA`: load the built-in sample catalog when no seed
//!   file is set (default: `true`)
//!
//! # Invariants
//!
//! - A configured `seed_file` is never an empty path
//! - `load_sample_data` is only consulted when `seed_file` is `None`

use std::path::PathBuf;

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// File the initial item set is read from.
    pub seed_file: Option<PathBuf>,
    /// Whether to fall back to the sample catalog when no seed file is set.
    pub load_sample_data: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            load_sample_data: Self::DEFAULT_LOAD_SAMPLE_DATA,
        }
    }
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl CatalogConfig {
    pub const SEED_FILE_VAR: &'static str = "CATALOG_SEED_FILE";
    pub const LOAD_SAMPLE_DATA_VAR: &'static str = "CATALOG_LOAD_SAMPLE_DATA";
    /// Default for `load_sample_data`.
    pub const DEFAULT_LOAD_SAMPLE_DATA: bool = true;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `CATALOG_SEED_FILE` is set but empty
    /// - `CATALOG_LOAD_SAMPLE_DATA` is set but not a boolean
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let seed_file = Self::load_seed_file(lookup(Self::SEED_FILE_VAR))?;
        let load_sample_data = Self::load_sample_data(lookup(Self::LOAD_SAMPLE_DATA_VAR))?;

        Ok(Self {
            seed_file,
            load_sample_data,
        })
    }

    fn load_seed_file(value: Option<String>) -> Result<Option<PathBuf>, ConfigError> {
        match value {
            Some(path) if path.trim().is_empty() => Err(ConfigError::InvalidValue {
                name: Self::SEED_FILE_VAR.to_string(),
                message: "must not be empty".to_string(),
            }),
            Some(path) => Ok(Some(PathBuf::from(path))),
            None => Ok(None),
        }
    }

    /// Parse the sample-data flag.
    ///
    /// Returns the default if not set.
    fn load_sample_data(value: Option<String>) -> Result<bool, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::DEFAULT_LOAD_SAMPLE_DATA);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name: Self::LOAD_SAMPLE_DATA_VAR.to_string(),
                message: format!("'{value}' is not a boolean (expected true or false)"),
            }),
        }
    }
}
