//! # mzdex-config
//!
//! Layered configuration loading for mzdex using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MZDEX_*` prefix, `__` as separator)
//! 2. The legacy `DATABASE_PATH` variable (maps to `database.path`)
//! 3. Project-level `.mzdex/config.toml`
//! 4. User-level `~/.config/mzdex/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MZDEX_DATABASE__PATH` -> `database.path`,
//! `MZDEX_SEARCH__MAX_CANDIDATES` -> `search.max_candidates`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use mzdex_config::MzdexConfig;
//!
//! let config = MzdexConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod profile;
mod search;

pub use database::{DEFAULT_DATABASE_PATH, DatabaseConfig};
pub use error::ConfigError;
pub use profile::DomainProfile;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MzdexConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default = "DomainProfile::metabolites")]
    pub metabolites: DomainProfile,
    #[serde(default = "DomainProfile::enzymes")]
    pub enzymes: DomainProfile,
}

impl Default for MzdexConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            search: SearchConfig::default(),
            metabolites: DomainProfile::metabolites(),
            enzymes: DomainProfile::enzymes(),
        }
    }
}

impl MzdexConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".mzdex/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&["DATABASE_PATH"])
                    .map(|_| "database.path".into()),
            )
            .merge(Env::prefixed("MZDEX_").split("__"))
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(invalid("database.path", "must not be empty"));
        }
        if self.search.default_page_size == 0 {
            return Err(invalid("search.default_page_size", "must be > 0"));
        }
        if self.search.max_candidates == 0 {
            return Err(invalid("search.max_candidates", "must be > 0"));
        }
        if self.search.annotation_concurrency == 0 {
            return Err(invalid("search.annotation_concurrency", "must be > 0"));
        }
        for (field, profile) in [("metabolites", &self.metabolites), ("enzymes", &self.enzymes)] {
            if profile.canonical_table.trim().is_empty() {
                return Err(invalid(
                    &format!("{field}.canonical_table"),
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mzdex").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
