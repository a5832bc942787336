//! Path utilities for configuration directories used in tests.

use std::path::PathBuf;

use crate::fixtures::{SAMPLE_CATALOG_YAML, SAMPLE_DEFAULTS_YAML};

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the path to the checked-in config directory of a service.
///
/// # Arguments
///
/// * `service_name` - The name of the service (e.g., "sensor-api")
pub fn service_config_dir(service_name: &str) -> PathBuf {
    workspace_root()
        .join("services")
        .join(service_name)
        .join("config")
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary config directory holding `defaults.yaml` and
/// `catalog.yaml` with the given contents. `None` leaves the file out.
pub fn write_config_dir(defaults: Option<&str>, catalog: Option<&str>) -> tempfile::TempDir {
    let dir = tempfile::Builder::new()
        .prefix("sensor_api_config_")
        .tempdir()
        .expect("Failed to create temporary config directory");
    if let Some(defaults) = defaults {
        std::fs::write(dir.path().join("defaults.yaml"), defaults)
            .expect("Failed to write defaults.yaml");
    }
    if let Some(catalog) = catalog {
        std::fs::write(dir.path().join("catalog.yaml"), catalog)
            .expect("Failed to write catalog.yaml");
    }
    dir
}

/// A temporary config directory with the sample defaults and catalog.
pub fn sample_config_dir() -> tempfile::TempDir {
    write_config_dir(Some(SAMPLE_DEFAULTS_YAML), Some(SAMPLE_CATALOG_YAML))
}
