//! Application state for the sensor API.

use anyhow::Result;
use std::sync::Arc;

use query_filter::{ParameterBag, ParameterDefaults};

use crate::catalog::{InMemoryCatalog, ObservationStore};
use crate::config::ApiConfig;

/// Shared application state. Immutable after startup.
pub struct AppState {
    /// Catalog queries are evaluated against.
    pub catalog: Arc<dyn ObservationStore>,

    /// Parameter defaults layered under every request.
    pub defaults: ParameterDefaults,

    /// Directory the configuration was loaded from.
    pub config_dir: String,
}

impl AppState {
    /// Create the state from a configuration directory.
    pub fn new(config_dir: &str) -> Result<Self> {
        let config = ApiConfig::load_from_dir(config_dir)?;
        let catalog = InMemoryCatalog::from_config(&config.catalog);

        tracing::info!(
            datasets = catalog.len(),
            "Initialized in-memory catalog from {}",
            config_dir
        );

        Ok(Self::with_store(Arc::new(catalog), config.defaults, config_dir))
    }

    /// Create the state around an existing store.
    pub fn with_store(
        catalog: Arc<dyn ObservationStore>,
        defaults: ParameterDefaults,
        config_dir: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            defaults,
            config_dir: config_dir.into(),
        }
    }

    /// Request parameters on top of the configured defaults.
    pub fn parameters(&self, request: ParameterBag) -> ParameterBag {
        ParameterBag::with_defaults(&self.defaults, request)
    }
}
