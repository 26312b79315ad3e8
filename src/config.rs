//! Static configuration data: product catalog and coupon registry
//!
//! Supplied as structured records (JSON) at construction time. Validation
//! happens when the catalog and registry are built, not at parse time, so a
//! config file with bad data reports a configuration error rather than a
//! deserialization failure.

use crate::catalog::{Catalog, Category, Product};
use crate::coupon::{Coupon, CouponRegistry};
use crate::error::{CartError, CartResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog and coupon registry definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    pub products: Vec<Product>,
    pub coupons: Vec<Coupon>,
}

impl CheckoutConfig {
    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> CartResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CartError::invalid_config(format!("failed to parse config: {}", e)))
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> CartResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CartError::invalid_config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Build the validated catalog and coupon registry
    pub fn build(self) -> CartResult<(Catalog, CouponRegistry)> {
        let catalog = Catalog::new(self.products)?;
        let coupons = CouponRegistry::new(self.coupons)?;
        tracing::info!(
            products = catalog.len(),
            coupons = coupons.len(),
            "Checkout configuration loaded"
        );
        Ok((catalog, coupons))
    }

    /// Built-in demo catalog and coupons
    pub fn demo() -> Self {
        let product = |id: u32, name: &str, unit_price: f64, category: Category| Product {
            id,
            name: name.to_string(),
            unit_price,
            category,
        };
        let coupon = |code: &str, discount_rate: f64, description: &str| Coupon {
            code: code.to_string(),
            discount_rate,
            description: description.to_string(),
        };

        Self {
            products: vec![
                product(1, "Laptop", 45000.0, Category::Electronics),
                product(2, "Smartphone", 25000.0, Category::Electronics),
                product(3, "T-Shirt", 500.0, Category::Clothing),
                product(4, "Jeans", 1200.0, Category::Clothing),
                product(5, "Headphones", 2500.0, Category::Electronics),
                product(6, "Jacket", 2000.0, Category::Clothing),
            ],
            coupons: vec![
                coupon("SAVE10", 0.10, "10% off"),
                coupon("SAVE20", 0.20, "20% off"),
            ],
        }
    }
}
