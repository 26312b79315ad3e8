//! Cart aggregate: line items and the active coupon set
//!
//! Invariants maintained here:
//! - at most one line per product id (duplicate adds increment quantity)
//! - a line whose quantity drops to zero or below is removed, not retained
//! - the active coupon list is an insertion-ordered set, capped by policy
//!
//! A failed mutation leaves the cart untouched.

use crate::catalog::Catalog;
use crate::coupon::{canonicalize_code, Coupon, CouponRegistry};
use crate::error::{CartError, CartResult};
use crate::money::MAX_QUANTITY;
use serde::{Deserialize, Serialize};

/// Active coupon limit. A policy constant rather than a structural constraint
/// on the coupon list, so the limit can change without a data-model rewrite.
pub const MAX_ACTIVE_COUPONS: usize = 1;

/// One product/quantity pair in the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: u32,
    pub quantity: i32,
}

/// Cart aggregate root
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    coupons: Vec<Coupon>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Active coupons in insertion order
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Whether the cart has no line items
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Add one unit of a product. An existing line is incremented; otherwise
    /// a new line with quantity 1 is created.
    pub fn add_item(&mut self, catalog: &Catalog, product_id: u32) -> CartResult<()> {
        if !catalog.contains(product_id) {
            return Err(CartError::ProductNotFound { product_id });
        }

        match self.lines.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => {
                if line.quantity >= MAX_QUANTITY {
                    return Err(CartError::QuantityLimitExceeded {
                        product_id,
                        max: MAX_QUANTITY,
                    });
                }
                line.quantity += 1;
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    quantity: 1,
                });
            }
        }
        Ok(())
    }

    /// Delete the line for a product. Returns true if a line was removed.
    pub fn remove_item(&mut self, product_id: u32) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() < before
    }

    /// Adjust a line's quantity by `delta`. No line: no-op. A result of zero
    /// or below removes the line entirely.
    pub fn change_quantity(&mut self, product_id: u32, delta: i32) -> CartResult<()> {
        let Some(index) = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
        else {
            return Ok(());
        };

        let new_quantity = self.lines[index].quantity.saturating_add(delta);
        if new_quantity <= 0 {
            self.lines.remove(index);
        } else if new_quantity > MAX_QUANTITY {
            return Err(CartError::QuantityLimitExceeded {
                product_id,
                max: MAX_QUANTITY,
            });
        } else {
            self.lines[index].quantity = new_quantity;
        }
        Ok(())
    }

    /// Validate and admit a coupon code into the active set.
    ///
    /// Returns the resolved coupon on success. Check order: empty code,
    /// unknown code, already applied, coupon limit.
    pub fn apply_coupon(&mut self, registry: &CouponRegistry, raw_code: &str) -> CartResult<Coupon> {
        let code = canonicalize_code(raw_code);
        if code.is_empty() {
            return Err(CartError::InvalidCode);
        }

        let Some(coupon) = registry.resolve(&code) else {
            return Err(CartError::UnknownCoupon { code });
        };

        if self.coupons.iter().any(|c| c.code == code) {
            return Err(CartError::AlreadyApplied { code });
        }

        if self.coupons.len() >= MAX_ACTIVE_COUPONS {
            return Err(CartError::CouponLimitExceeded {
                limit: MAX_ACTIVE_COUPONS,
            });
        }

        let coupon = coupon.clone();
        self.coupons.push(coupon.clone());
        Ok(coupon)
    }

    /// Remove a coupon from the active set. Returns true if one was removed.
    pub fn remove_coupon(&mut self, raw_code: &str) -> bool {
        let code = canonicalize_code(raw_code);
        let before = self.coupons.len();
        self.coupons.retain(|coupon| coupon.code != code);
        self.coupons.len() < before
    }

    /// Empty all lines and the active coupon set. Used after checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.coupons.clear();
    }
}
