//! Store-list configuration: which stores' weekly-offer pages to scrape.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Display name of the store, e.g. `"ICA Maxi Stormarknad"`.
    pub name: String,
    /// URL of the store's weekly-offers listing page.
    pub url: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreConfig>,
}

/// Load and validate the stores configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_stores(path: &Path) -> Result<StoresFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let stores_file: StoresFile = serde_yaml::from_str(&content)?;

    validate_stores(&stores_file)?;

    Ok(stores_file)
}

fn validate_stores(stores_file: &StoresFile) -> Result<(), ConfigError> {
    if stores_file.stores.is_empty() {
        return Err(ConfigError::Validation(
            "stores file must list at least one store".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    let mut seen_urls = HashSet::new();

    for store in &stores_file.stores {
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store name must be non-empty".to_string(),
            ));
        }
        if !store.url.starts_with("http://") && !store.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "store '{}' has a non-HTTP url: {}",
                store.name, store.url
            )));
        }
        if !seen_names.insert(store.name.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store name: {}",
                store.name
            )));
        }
        if !seen_urls.insert(store.url.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store url: {}",
                store.url
            )));
        }
    }

    Ok(())
}
