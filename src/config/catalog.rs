//! Product catalog: the static table of orderable products

use super::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single orderable product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Human-readable name used in messages and notifications
    pub display_name: String,

    /// Smallest quantity accepted for an order
    pub minimum_quantity: f64,
}

impl Product {
    pub fn new(display_name: impl Into<String>, minimum_quantity: f64) -> Self {
        Self {
            display_name: display_name.into(),
            minimum_quantity,
        }
    }
}

/// Immutable mapping from product key to [`Product`]
///
/// Built once at startup and shared behind an `Arc`. There is no mutation API;
/// a different catalog means building a new one.
///
/// # YAML format
///
/// ```yaml
/// products:
///   fish_feed:
///     display_name: Fish Feed
///     minimum_quantity: 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: IndexMap<String, Product>,
}

impl ProductCatalog {
    /// Build a catalog from `(key, product)` pairs, checking every entry
    pub fn from_entries<I, K>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, Product)>,
        K: Into<String>,
    {
        let catalog = Self {
            products: entries
                .into_iter()
                .map(|(key, product)| (key.into(), product))
                .collect(),
        };
        catalog.check()?;
        Ok(catalog)
    }

    /// Load a catalog from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            source_name: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Load a catalog from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let catalog: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            source_name: path.to_string(),
            message: e.to_string(),
        })?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Look up a product by key
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.products.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.products.contains_key(key)
    }

    /// Product keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // Minimums must be finite and strictly positive.
    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if self.products.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        for (key, product) in &self.products {
            if key.is_empty() {
                return Err(ConfigError::InvalidProduct {
                    key: key.clone(),
                    reason: "product key must not be empty".to_string(),
                });
            }
            if !product.minimum_quantity.is_finite() || product.minimum_quantity <= 0.0 {
                return Err(ConfigError::InvalidProduct {
                    key: key.clone(),
                    reason: format!(
                        "minimum_quantity must be a positive number (got {})",
                        product.minimum_quantity
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for ProductCatalog {
    /// The three products sold by the shop
    fn default() -> Self {
        let mut products = IndexMap::new();
        products.insert("fish_feed".to_string(), Product::new("Fish Feed", 10.0));
        products.insert("catfish".to_string(), Product::new("Catfish", 1.0));
        products.insert("materials".to_string(), Product::new("Materials", 50.0));
        Self { products }
    }
}
