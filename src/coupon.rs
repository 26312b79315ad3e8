//! Coupon definitions and registry
//!
//! Coupon codes are case-insensitive and canonicalized to uppercase. The
//! registry is static configuration data, looked up by canonical code.

use crate::error::{CartError, CartResult};
use crate::money::require_finite;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical form of a coupon code: trimmed, uppercase
pub fn canonicalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Coupon definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Canonical (uppercase) code
    pub code: String,
    /// Discount rate in [0, 1), applied to the cart subtotal
    pub discount_rate: f64,
    pub description: String,
}

/// Fixed registry of valid coupons, keyed by canonical code
#[derive(Debug, Clone, Default)]
pub struct CouponRegistry {
    coupons: HashMap<String, Coupon>,
}

impl CouponRegistry {
    /// Build a registry from coupon definitions, validating each entry
    pub fn new(coupons: Vec<Coupon>) -> CartResult<Self> {
        let mut map = HashMap::with_capacity(coupons.len());

        for mut coupon in coupons {
            let code = canonicalize_code(&coupon.code);
            if code.is_empty() {
                return Err(CartError::invalid_config("coupon code must not be empty"));
            }
            require_finite(coupon.discount_rate, "discount_rate")?;
            if !(0.0..1.0).contains(&coupon.discount_rate) {
                return Err(CartError::invalid_config(format!(
                    "discount_rate must be in [0, 1), got {} for coupon {}",
                    coupon.discount_rate, code
                )));
            }
            coupon.code = code.clone();
            if map.insert(code.clone(), coupon).is_some() {
                return Err(CartError::invalid_config(format!(
                    "duplicate coupon code: {}",
                    code
                )));
            }
        }

        Ok(Self { coupons: map })
    }

    /// Resolve a raw code to its coupon definition, if registered
    pub fn resolve(&self, raw_code: &str) -> Option<&Coupon> {
        self.coupons.get(&canonicalize_code(raw_code))
    }

    /// Iterate over all registered coupons
    pub fn iter(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.values()
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(code: &str, rate: f64) -> Coupon {
        Coupon {
            code: code.to_string(),
            discount_rate: rate,
            description: format!("{}% off", (rate * 100.0) as u32),
        }
    }

    #[test]
    fn test_canonicalize_code() {
        assert_eq!(canonicalize_code("  save10 "), "SAVE10");
        assert_eq!(canonicalize_code("SAVE20"), "SAVE20");
        assert_eq!(canonicalize_code("   "), "");
    }

    #[test]
    fn test_registry_case_insensitive_lookup() {
        let registry = CouponRegistry::new(vec![coupon("save10", 0.10)]).unwrap();
        let resolved = registry.resolve(" Save10 ").unwrap();
        assert_eq!(resolved.code, "SAVE10");
        assert_eq!(resolved.discount_rate, 0.10);
        assert!(registry.resolve("SAVE20").is_none());
    }

    #[test]
    fn test_registry_rejects_empty_code() {
        assert!(CouponRegistry::new(vec![coupon("  ", 0.10)]).is_err());
    }

    #[test]
    fn test_registry_rejects_bad_rate() {
        assert!(CouponRegistry::new(vec![coupon("FREE", 1.0)]).is_err());
        assert!(CouponRegistry::new(vec![coupon("NEG", -0.1)]).is_err());
        assert!(CouponRegistry::new(vec![coupon("NAN", f64::NAN)]).is_err());
        // Zero-rate coupons are allowed
        assert!(CouponRegistry::new(vec![coupon("ZERO", 0.0)]).is_ok());
    }

    #[test]
    fn test_registry_rejects_duplicate_after_canonicalization() {
        let err = CouponRegistry::new(vec![coupon("SAVE10", 0.10), coupon("save10", 0.15)])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate coupon code"));
    }
}
