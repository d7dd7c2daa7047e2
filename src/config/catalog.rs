//! Product catalog loading from config.toml
//!
//! The catalog is a list of `[[products]]` tables:
//!
//! ```toml
//! [[products]]
//! id = 1
//! name = "Product 1"
//! image = "/product1.jpg"
//! ```
//!
//! When no file exists at the configured path the built-in catalog is used.

use crate::{
    core::product::{Catalog, Product},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Default catalog path when `CATALOG_PATH` is unset.
pub const DEFAULT_CATALOG_PATH: &str = "config.toml";

/// Configuration structure representing the catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Products in display order
    pub products: Vec<Product>,
}

/// Parses catalog TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or the catalog fails
/// validation (empty, duplicate or non-positive ids, blank names).
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    let config: CatalogConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog: {e}"),
    })?;
    Catalog::new(config.products)
}

/// Loads the catalog from a TOML file, falling back to the built-in catalog
/// when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No catalog at {}, using built-in products", path.display());
        return Ok(Catalog::builtin());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {}: {e}", path.display()),
    })?;
    let catalog = parse_catalog(&contents)?;
    info!(
        "Loaded {} products from {}",
        catalog.products().len(),
        path.display()
    );
    Ok(catalog)
}

/// Loads the catalog from `CATALOG_PATH` (default `./config.toml`).
///
/// # Errors
/// Same as [`load_catalog`].
pub fn load_default_catalog() -> Result<Catalog> {
    let path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
    load_catalog(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let toml_str = r#"
            [[products]]
            id = 10
            name = "Rice"
            image = "/rice.png"

            [[products]]
            id = 11
            name = "Flour"
            image = "/flour.png"
        "#;

        let catalog = parse_catalog(toml_str).unwrap();
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(catalog.get(10).unwrap().name, "Rice");
        assert_eq!(catalog.get(11).unwrap().image_ref, "/flour.png");
    }

    #[test]
    fn test_parse_catalog_rejects_duplicates() {
        let toml_str = r#"
            [[products]]
            id = 1
            name = "Rice"
            image = "/rice.png"

            [[products]]
            id = 1
            name = "Flour"
            image = "/flour.png"
        "#;

        assert!(matches!(
            parse_catalog(toml_str).unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_parse_catalog_rejects_bad_toml() {
        assert!(matches!(
            parse_catalog("products = 3").unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let catalog = load_catalog("definitely/not/here.toml").unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }
}
