//! Product catalog - the fixed set of products stock can be tracked for.
//!
//! Products are not user-editable. The catalog is loaded once at startup (see
//! [`crate::config::catalog`]) and only ever read afterwards.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id, referenced by stock records and history entries
    pub id: i64,
    /// Display name
    pub name: String,
    /// Image reference (path or URL), never resolved by the tracker
    #[serde(rename = "image")]
    pub image_ref: String,
}

impl Product {
    /// Creates a product.
    pub fn new(id: i64, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// The validated, ordered set of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, validating that it is non-empty, that every id is
    /// positive and unique, and that every name is non-blank.
    ///
    /// # Errors
    /// Returns `Error::Config` describing the first problem found.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        if products.is_empty() {
            return Err(Error::Config {
                message: "Product catalog cannot be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for product in &products {
            if product.id <= 0 {
                return Err(Error::Config {
                    message: format!("Product id must be positive, got {}", product.id),
                });
            }
            if product.name.trim().is_empty() {
                return Err(Error::Config {
                    message: format!("Product {} has an empty name", product.id),
                });
            }
            if !seen.insert(product.id) {
                return Err(Error::Config {
                    message: format!("Duplicate product id {}", product.id),
                });
            }
        }

        Ok(Self { products })
    }

    /// The five-product catalog used when no catalog file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: vec![
                Product::new(1, "Product 1", "/product1.jpg"),
                Product::new(2, "Product 2", "/product2.jpeg"),
                Product::new(3, "Product 3", "/product3.png"),
                Product::new(4, "Product 4", "/product4.jpeg"),
                Product::new(5, "Product 5", "/product5.webp"),
            ],
        }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks a product up by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks a product up by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Resolves user input that is either a product name or a numeric id.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` if nothing matches.
    pub fn resolve(&self, input: &str) -> Result<&Product> {
        self.find_by_name(input)
            .or_else(|| input.trim().parse::<i64>().ok().and_then(|id| self.get(id)))
            .ok_or_else(|| Error::ProductNotFound {
                name: input.to_string(),
            })
    }

    /// Display name for a product id, falling back to `#id` for ids that are
    /// no longer in the catalog (e.g. history written with an older catalog).
    #[must_use]
    pub fn display_name(&self, id: i64) -> String {
        self.get(id)
            .map_or_else(|| format!("#{id}"), |p| p.name.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.products().len(), 5);
        assert_eq!(catalog.get(1).unwrap().name, "Product 1");
        assert_eq!(catalog.get(5).unwrap().image_ref, "/product5.webp");
        assert!(catalog.get(6).is_none());
    }

    #[test]
    fn test_catalog_validation() {
        let result = Catalog::new(Vec::new());
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = Catalog::new(vec![Product::new(0, "Zero", "")]);
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = Catalog::new(vec![Product::new(1, "   ", "")]);
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = Catalog::new(vec![
            Product::new(1, "Rice", "/rice.png"),
            Product::new(1, "Beans", "/beans.png"),
        ]);
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[test]
    fn test_resolve_by_name_or_id() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.resolve("product 3").unwrap().id, 3);
        assert_eq!(catalog.resolve(" 4 ").unwrap().id, 4);
        assert!(matches!(
            catalog.resolve("Product 9").unwrap_err(),
            Error::ProductNotFound { name: _ }
        ));
    }

    #[test]
    fn test_display_name_for_unknown_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.display_name(2), "Product 2");
        assert_eq!(catalog.display_name(42), "#42");
    }
}
