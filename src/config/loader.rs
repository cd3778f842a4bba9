//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading year-versioned
//! rate bundles from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineMetadata, TaxYearConfig};

/// Loads and provides access to the rate bundles.
///
/// # Directory Structure
///
/// ```text
/// config/de/
/// ├── metadata.yaml     # Rule set metadata
/// └── years/
///     └── 2025.yaml     # Rate bundle effective from this tax year
/// ```
///
/// # Example
///
/// ```no_run
/// use lohn_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let bundle = loader.tax_year(2025).unwrap();
/// println!("Minijob threshold: {}", bundle.social_insurance.minijob.threshold);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if a file is missing, contains invalid YAML, or a bundle violates
    /// a table invariant.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("metadata.yaml"))?;
        let years = Self::load_years(&path.join("years"))?;

        debug!(
            jurisdiction = %metadata.jurisdiction,
            bundles = years.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: EngineConfig::new(metadata, years),
        })
    }

    /// Wraps an already assembled configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all bundles from the years directory.
    fn load_years(years_dir: &Path) -> EngineResult<Vec<TaxYearConfig>> {
        let years_dir_str = years_dir.display().to_string();

        let entries = fs::read_dir(years_dir).map_err(|_| EngineError::ConfigNotFound {
            path: years_dir_str.clone(),
        })?;

        let mut years = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: years_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let bundle = Self::load_yaml::<TaxYearConfig>(&path)?;
                bundle.validate()?;
                years.push(bundle);
            }
        }

        if years.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate bundles found)", years_dir_str),
            });
        }

        Ok(years)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the bundle effective for `year`.
    ///
    /// The most recent bundle whose year is on or before the requested year
    /// is used, so a year without its own file inherits the previous rates.
    pub fn tax_year(&self, year: i32) -> EngineResult<&TaxYearConfig> {
        self.config
            .years()
            .iter()
            .rfind(|bundle| bundle.year <= year)
            .ok_or(EngineError::TaxYearNotFound { year })
    }

    /// Returns the newest bundle.
    pub fn latest(&self) -> EngineResult<&TaxYearConfig> {
        self.config
            .years()
            .last()
            .ok_or(EngineError::TaxYearNotFound { year: 0 })
    }

    /// Returns the bundle for `year`, or the newest when `year` is `None`.
    pub fn resolve(&self, year: Option<i32>) -> EngineResult<&TaxYearConfig> {
        match year {
            Some(year) => self.tax_year(year),
            None => self.latest(),
        }
    }
}
