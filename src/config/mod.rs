//! Configuration module
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "ADDRESS_AUTOCOMPLETE_SETTINGS_PATH";

/// Candidate settings locations, in lookup order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("address-autocomplete/settings.yml"));
    }
    paths
}

/// Load settings from the first file found, or use defaults.
///
/// Environment overrides are applied last in every case.
pub fn load() -> Result<Settings> {
    let explicit = std::env::var(SETTINGS_PATH_VAR).ok().map(PathBuf::from);

    let found = explicit
        .into_iter()
        .chain(default_paths())
        .find(|path| path.exists());

    let mut settings = match found {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}
