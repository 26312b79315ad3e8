//! Checkout session: the cart aggregate plus its static configuration
//!
//! Owns the cart for the current user session and holds shared handles to the
//! catalog and coupon registry. Every mutation is applied to the cart first,
//! then pricing is derived from the now-consistent snapshot and returned as
//! one logical step, so a caller never observes a half-updated cart.
//!
//! Single-threaded, synchronous semantics. Callers that need concurrent
//! access must wrap the session in an exclusive-access lock.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::config::CheckoutConfig;
use crate::coupon::CouponRegistry;
use crate::error::{CartError, CartResult};
use crate::pricing::{compute_pricing, PricingResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Checkout receipt, captured before the cart is cleared
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    /// Receipt ID (UUID v4)
    pub receipt_id: String,
    /// Total quantity across all lines
    pub item_count: i32,
    /// Final pricing snapshot
    pub pricing: PricingResult,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
}

/// Session-scoped checkout state
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    catalog: Arc<Catalog>,
    coupons: Arc<CouponRegistry>,
    cart: Cart,
}

impl CheckoutSession {
    /// Create a session with an empty cart
    pub fn new(catalog: Arc<Catalog>, coupons: Arc<CouponRegistry>) -> Self {
        Self {
            catalog,
            coupons,
            cart: Cart::new(),
        }
    }

    /// Build catalog and registry from configuration and start a session
    pub fn from_config(config: CheckoutConfig) -> CartResult<Self> {
        let (catalog, coupons) = config.build()?;
        Ok(Self::new(Arc::new(catalog), Arc::new(coupons)))
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current pricing for the cart snapshot
    pub fn pricing(&self) -> PricingResult {
        compute_pricing(&self.cart, &self.catalog)
    }

    /// Add one unit of a product to the cart
    pub fn add_item(&mut self, product_id: u32) -> CartResult<PricingResult> {
        if let Err(err) = self.cart.add_item(&self.catalog, product_id) {
            tracing::warn!(product_id, error = %err, "Rejected add to cart");
            return Err(err);
        }
        tracing::info!(product_id, "Item added to cart");
        Ok(self.reprice())
    }

    /// Remove a product's line from the cart (no-op if absent)
    pub fn remove_item(&mut self, product_id: u32) -> PricingResult {
        if self.cart.remove_item(product_id) {
            tracing::info!(product_id, "Item removed from cart");
        }
        self.reprice()
    }

    /// Adjust a line's quantity by `delta`
    pub fn change_quantity(&mut self, product_id: u32, delta: i32) -> CartResult<PricingResult> {
        if let Err(err) = self.cart.change_quantity(product_id, delta) {
            tracing::warn!(product_id, delta, error = %err, "Rejected quantity change");
            return Err(err);
        }
        tracing::debug!(product_id, delta, "Quantity changed");
        Ok(self.reprice())
    }

    /// Validate and apply a coupon code
    pub fn apply_coupon(&mut self, raw_code: &str) -> CartResult<PricingResult> {
        match self.cart.apply_coupon(&self.coupons, raw_code) {
            Ok(coupon) => {
                tracing::info!(
                    code = %coupon.code,
                    discount_rate = coupon.discount_rate,
                    "Coupon applied"
                );
                Ok(self.reprice())
            }
            Err(err) => {
                tracing::warn!(code = raw_code, error = %err, "Rejected coupon");
                Err(err)
            }
        }
    }

    /// Remove a coupon from the active set (no-op if absent)
    pub fn remove_coupon(&mut self, raw_code: &str) -> PricingResult {
        if self.cart.remove_coupon(raw_code) {
            tracing::info!(code = raw_code, "Coupon removed");
        }
        self.reprice()
    }

    /// Finalize the cart: capture the pricing snapshot as a receipt, then
    /// clear all lines and coupons. Fails with `EmptyCart` on an empty cart,
    /// leaving it unchanged.
    pub fn checkout(&mut self) -> CartResult<Receipt> {
        if self.cart.is_empty() {
            tracing::warn!("Checkout attempted on empty cart");
            return Err(CartError::EmptyCart);
        }

        let pricing = self.pricing();
        let receipt = Receipt {
            receipt_id: uuid::Uuid::new_v4().to_string(),
            item_count: self.cart.item_count(),
            pricing,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        self.cart.clear();
        tracing::info!(
            receipt_id = %receipt.receipt_id,
            item_count = receipt.item_count,
            final_total = receipt.pricing.final_total,
            "Checkout completed"
        );
        Ok(receipt)
    }

    fn reprice(&self) -> PricingResult {
        let result = self.pricing();
        tracing::debug!(
            subtotal = result.subtotal,
            total_discount = result.total_discount,
            final_total = result.final_total,
            "Cart repriced"
        );
        result
    }
}
