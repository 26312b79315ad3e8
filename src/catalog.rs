//! Product catalog
//!
//! The catalog is static configuration data: loaded once at construction,
//! validated at the boundary, never mutated afterwards.

use crate::error::{CartError, CartResult};
use crate::money::{require_finite, MAX_UNIT_PRICE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Product category (open set)
///
/// Known categories carry discount semantics in the pricing engine; anything
/// else round-trips through `Other` untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Electronics,
    Clothing,
    Other(String),
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "ELECTRONICS" => Self::Electronics,
            "CLOTHING" => Self::Clothing,
            _ => Self::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Electronics => "ELECTRONICS".to_string(),
            Category::Clothing => "CLOTHING".to_string(),
            Category::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electronics => write!(f, "ELECTRONICS"),
            Self::Clothing => write!(f, "CLOTHING"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub unit_price: f64,
    pub category: Category,
}

/// Product catalog keyed by product id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<u32, Product>,
}

impl Catalog {
    /// Build a catalog from product definitions, validating each entry
    pub fn new(products: Vec<Product>) -> CartResult<Self> {
        let mut map = HashMap::with_capacity(products.len());

        for product in products {
            if product.id == 0 {
                return Err(CartError::invalid_config(format!(
                    "product id must be positive, got 0 for '{}'",
                    product.name
                )));
            }
            if product.name.trim().is_empty() {
                return Err(CartError::invalid_config(format!(
                    "product {} has an empty name",
                    product.id
                )));
            }
            require_finite(product.unit_price, "unit_price")?;
            if product.unit_price < 0.0 {
                return Err(CartError::invalid_config(format!(
                    "unit_price must be non-negative, got {} for product {}",
                    product.unit_price, product.id
                )));
            }
            if product.unit_price > MAX_UNIT_PRICE {
                return Err(CartError::invalid_config(format!(
                    "unit_price exceeds maximum allowed ({}), got {} for product {}",
                    MAX_UNIT_PRICE, product.unit_price, product.id
                )));
            }
            if map.insert(product.id, product.clone()).is_some() {
                return Err(CartError::invalid_config(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }

        Ok(Self { products: map })
    }

    /// Look up a product by id
    pub fn get(&self, product_id: u32) -> Option<&Product> {
        self.products.get(&product_id)
    }

    /// Check if a product id exists
    pub fn contains(&self, product_id: u32) -> bool {
        self.products.contains_key(&product_id)
    }

    /// Iterate over all products
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
