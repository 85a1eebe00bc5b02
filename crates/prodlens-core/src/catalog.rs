use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Facet values offered by the finder and updates views.
///
/// Categories and brands are open-ended on the provider side; the catalog only
/// controls which checkboxes the UI offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub update_categories: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            categories: owned(&["Electronics", "Audio", "Wearables", "Computers", "Photography"]),
            brands: owned(&["TechBrand", "CompuTech", "SoundMax", "FitTech", "PhotoPro"]),
            update_categories: owned(&["Smartphones", "Laptops", "Audio", "Wearables", "Smart Home"]),
        }
    }
}

/// Load and validate the catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: Catalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;

    Ok(catalog)
}

/// Like [`load_catalog`], but falls back to [`Catalog::default`] when the file
/// does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but is unreadable or invalid.
pub fn load_catalog_or_default(path: &Path) -> Result<Catalog, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "catalog file not found; using built-in facets");
        return Ok(Catalog::default());
    }
    load_catalog(path)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    validate_facet("category", &catalog.categories)?;
    validate_facet("brand", &catalog.brands)?;
    validate_facet("update category", &catalog.update_categories)?;

    if catalog.update_categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one update category is required".to_string(),
        ));
    }

    Ok(())
}

fn validate_facet(kind: &str, values: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{kind} name must be non-empty")));
        }
        if !seen.insert(value.to_lowercase()) {
            return Err(ConfigError::Validation(format!("duplicate {kind}: '{value}'")));
        }
    }
    Ok(())
}
