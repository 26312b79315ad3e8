//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values are stored as `f64` and computed with `Decimal` internally,
//! then rounded to 2 decimal places (half-up) at the storage boundary.

use crate::error::{CartError, CartResult};
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price per product
pub const MAX_UNIT_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per cart line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
///
/// Input values are validated as finite at the boundary. If NaN/Infinity
/// somehow reaches here, logs an error and returns ZERO to avoid silent
/// corruption in monetary calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub(crate) fn require_finite(value: f64, field_name: &str) -> CartResult<()> {
    if !value.is_finite() {
        return Err(CartError::invalid_config(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}
