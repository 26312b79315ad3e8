//! Cart Engine - shopping cart pricing core
//!
//! A pure, session-scoped checkout engine: a mutable cart aggregate fed by
//! user actions, and a deterministic pricing computation over its snapshot.
//! The presentation layer renders the returned pricing results and forwards
//! user actions back in; it never reaches into cart state directly.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── catalog.rs   # Immutable product catalog (static configuration)
//! ├── coupon.rs    # Coupon definitions and registry
//! ├── cart.rs      # Cart aggregate: lines + active coupons
//! ├── pricing/     # Pure pricing computation (bulk/category/coupon discounts)
//! ├── session.rs   # Checkout session: mutations + repricing + checkout
//! ├── config.rs    # JSON configuration loading
//! ├── money.rs     # Decimal conversion and rounding helpers
//! └── error.rs     # Error types
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod session;

// Re-export public types
pub use cart::{Cart, CartLine, MAX_ACTIVE_COUPONS};
pub use catalog::{Catalog, Category, Product};
pub use config::CheckoutConfig;
pub use coupon::{canonicalize_code, Coupon, CouponRegistry};
pub use error::{CartError, CartResult, ErrorCode};
pub use pricing::{compute_pricing, LineBreakdown, PricingResult, BULK_QUANTITY_THRESHOLD};
pub use session::{CheckoutSession, Receipt};
