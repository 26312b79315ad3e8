//! Error types for the cart engine
//!
//! Every failure here is a rejected user action: recoverable, reported to the
//! caller as a structured result, and guaranteed to leave the cart unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes for the presentation layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ProductNotFound,
    InvalidCode,
    UnknownCoupon,
    AlreadyApplied,
    CouponLimitExceeded,
    QuantityLimitExceeded,
    EmptyCart,
    InvalidConfig,
}

/// Unified error type for cart and checkout operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// Product id is not in the catalog
    #[error("product {product_id} not found in catalog")]
    ProductNotFound { product_id: u32 },

    /// Coupon code was empty after canonicalization
    #[error("coupon code is empty")]
    InvalidCode,

    /// Coupon code is not in the registry
    #[error("unknown coupon code: {code}")]
    UnknownCoupon { code: String },

    /// Coupon is already in the active set
    #[error("coupon {code} is already applied")]
    AlreadyApplied { code: String },

    /// Active coupon limit reached
    #[error("only {limit} active coupon(s) allowed")]
    CouponLimitExceeded { limit: usize },

    /// Quantity would exceed the per-line maximum
    #[error("quantity for product {product_id} exceeds maximum allowed ({max})")]
    QuantityLimitExceeded { product_id: u32, max: i32 },

    /// Checkout attempted on an empty cart
    #[error("cart is empty")]
    EmptyCart,

    /// Invalid catalog or coupon registry data
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CartError {
    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }

    /// Get the stable error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ProductNotFound { .. } => ErrorCode::ProductNotFound,
            Self::InvalidCode => ErrorCode::InvalidCode,
            Self::UnknownCoupon { .. } => ErrorCode::UnknownCoupon,
            Self::AlreadyApplied { .. } => ErrorCode::AlreadyApplied,
            Self::CouponLimitExceeded { .. } => ErrorCode::CouponLimitExceeded,
            Self::QuantityLimitExceeded { .. } => ErrorCode::QuantityLimitExceeded,
            Self::EmptyCart => ErrorCode::EmptyCart,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
        }
    }
}

/// Result type for cart operations
pub type CartResult<T> = Result<T, CartError>;
