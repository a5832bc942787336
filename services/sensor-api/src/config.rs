//! Service configuration loaded from YAML files.
//!
//! A config directory holds two optional files:
//!
//! - `defaults.yaml`: parameter defaults layered under every request
//! - `catalog.yaml`: the datasets served by the in-memory catalog

use anyhow::{Context, Result};
use query_filter::ParameterDefaults;
use serde::{Deserialize, Serialize};
use sensor_common::CrsCode;
use std::path::Path;

use crate::catalog::DatasetRecord;

const DEFAULTS_FILE: &str = "defaults.yaml";
const CATALOG_FILE: &str = "catalog.yaml";

/// Configuration of the sensor API.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Defaults applied to request parameters the client left out.
    pub defaults: ParameterDefaults,

    /// Catalog contents.
    pub catalog: CatalogConfig,
}

impl ApiConfig {
    /// Load configuration from a directory of YAML files.
    pub fn load_from_dir(dir: &str) -> Result<Self> {
        let path = Path::new(dir);

        // If directory doesn't exist, return default config
        if !path.exists() {
            tracing::warn!(
                "Sensor API config directory {} does not exist, using defaults",
                dir
            );
            return Ok(Self::default());
        }

        let defaults: ParameterDefaults = read_yaml(&path.join(DEFAULTS_FILE))?.unwrap_or_default();
        let catalog: CatalogConfig = read_yaml(&path.join(CATALOG_FILE))?.unwrap_or_default();

        tracing::info!(
            defaults = defaults.len(),
            datasets = catalog.datasets.len(),
            storage_crs = %catalog.storage_crs,
            "Loaded sensor API config from {}",
            dir
        );

        Ok(Self { defaults, catalog })
    }
}

/// Catalog section, stored as `catalog.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// CRS of the stored feature locations, easting/longitude first.
    #[serde(default = "default_storage_crs")]
    pub storage_crs: CrsCode,

    #[serde(default)]
    pub datasets: Vec<DatasetRecord>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_crs: default_storage_crs(),
            datasets: Vec::new(),
        }
    }
}

fn default_storage_crs() -> CrsCode {
    CrsCode::Epsg4326
}

/// Parse a YAML file, `None` if it does not exist. An empty file parses as
/// the type's default.
fn read_yaml<T>(file_path: &Path) -> Result<Option<T>>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !file_path.exists() {
        tracing::debug!("Config file {:?} not found, skipping", file_path);
        return Ok(None);
    }

    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read: {:?}", file_path))?;
    if content.trim().is_empty() {
        return Ok(Some(T::default()));
    }

    let value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse: {:?}", file_path))?;
    Ok(Some(value))
}
