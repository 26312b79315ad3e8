//! Discount and pricing computation
//!
//! Uses rust_decimal for precise calculations, stores as f64.
//!
//! Three independent discount accumulators are evaluated and summed:
//! - bulk: per line, 10% of the line subtotal once quantity reaches 5
//! - category: per line, 15% for Electronics, 20% for Clothing
//! - coupon: per active coupon, rate applied to the pre-discount subtotal
//!
//! Discounts are not compounded or cascaded; the final total is the subtotal
//! minus their sum, clamped at zero.

use crate::cart::Cart;
use crate::catalog::{Catalog, Category};
use crate::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Quantity at which a line qualifies for the bulk discount
pub const BULK_QUANTITY_THRESHOLD: i32 = 5;

/// Bulk discount rate (0.10)
const BULK_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// Electronics category discount rate (0.15)
const ELECTRONICS_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
/// Clothing category discount rate (0.20)
const CLOTHING_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Discount rate for a product category
fn category_rate(category: &Category) -> Decimal {
    match category {
        Category::Electronics => ELECTRONICS_RATE,
        Category::Clothing => CLOTHING_RATE,
        Category::Other(_) => Decimal::ZERO,
    }
}

/// Per-line breakdown for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineBreakdown {
    pub product_id: u32,
    pub name: String,
    pub quantity: i32,
    /// unit_price * quantity, before any discount
    pub line_subtotal: f64,
    pub bulk_discount: f64,
    pub category_discount: f64,
}

/// Aggregated pricing result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingResult {
    pub subtotal: f64,
    pub bulk_discount: f64,
    pub category_discount: f64,
    pub coupon_discount: f64,
    pub total_discount: f64,
    /// subtotal minus total discount, floored at zero
    pub final_total: f64,
    pub lines: Vec<LineBreakdown>,
}

/// Compute pricing for a cart snapshot
///
/// Pure function of (catalog, cart lines, active coupons). An empty cart
/// yields an all-zero result; there are no error conditions. Lines whose
/// product is missing from the catalog contribute nothing (the cart store
/// validates ids at add time, so this only guards stale snapshots).
pub fn compute_pricing(cart: &Cart, catalog: &Catalog) -> PricingResult {
    let mut subtotal = Decimal::ZERO;
    let mut bulk_discount = Decimal::ZERO;
    let mut category_discount = Decimal::ZERO;
    let mut lines = Vec::with_capacity(cart.lines().len());

    for line in cart.lines() {
        let Some(product) = catalog.get(line.product_id) else {
            tracing::warn!(
                product_id = line.product_id,
                "Product not found in catalog, skipping line in pricing"
            );
            continue;
        };

        let quantity = Decimal::from(line.quantity);
        let line_subtotal = to_decimal(product.unit_price) * quantity;
        subtotal += line_subtotal;

        // Bulk discount is evaluated per line, not on cart-wide quantity
        let line_bulk = if line.quantity >= BULK_QUANTITY_THRESHOLD {
            line_subtotal * BULK_RATE
        } else {
            Decimal::ZERO
        };
        bulk_discount += line_bulk;

        // Applies in addition to the bulk discount on the same line
        let line_category = line_subtotal * category_rate(&product.category);
        category_discount += line_category;

        lines.push(LineBreakdown {
            product_id: product.id,
            name: product.name.clone(),
            quantity: line.quantity,
            line_subtotal: to_f64(line_subtotal),
            bulk_discount: to_f64(line_bulk),
            category_discount: to_f64(line_category),
        });
    }

    // Coupons apply to the pre-discount subtotal: independent sums, no cascade
    let coupon_discount: Decimal = cart
        .coupons()
        .iter()
        .map(|coupon| subtotal * to_decimal(coupon.discount_rate))
        .sum();

    let total_discount = bulk_discount + category_discount + coupon_discount;
    let final_total = (subtotal - total_discount).max(Decimal::ZERO);

    PricingResult {
        subtotal: to_f64(subtotal),
        bulk_discount: to_f64(bulk_discount),
        category_discount: to_f64(category_discount),
        coupon_discount: to_f64(coupon_discount),
        total_discount: to_f64(total_discount),
        final_total: to_f64(final_total),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::coupon::{Coupon, CouponRegistry};

    fn demo_catalog() -> Catalog {
        Catalog::new(vec![
            Product {
                id: 1,
                name: "Laptop".to_string(),
                unit_price: 45000.0,
                category: Category::Electronics,
            },
            Product {
                id: 3,
                name: "T-Shirt".to_string(),
                unit_price: 500.0,
                category: Category::Clothing,
            },
            Product {
                id: 7,
                name: "Gift Card".to_string(),
                unit_price: 100.0,
                category: Category::Other("Vouchers".to_string()),
            },
        ])
        .unwrap()
    }

    fn registry(code: &str, rate: f64) -> CouponRegistry {
        CouponRegistry::new(vec![Coupon {
            code: code.to_string(),
            discount_rate: rate,
            description: String::new(),
        }])
        .unwrap()
    }

    fn cart_with(catalog: &Catalog, items: &[(u32, i32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, qty) in items {
            cart.add_item(catalog, id).unwrap();
            cart.change_quantity(id, qty - 1).unwrap();
        }
        cart
    }

    #[test]
    fn test_empty_cart_all_zero() {
        let catalog = demo_catalog();
        let result = compute_pricing(&Cart::new(), &catalog);
        assert_eq!(result.subtotal, 0.0);
        assert_eq!(result.total_discount, 0.0);
        assert_eq!(result.final_total, 0.0);
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_bulk_discount_threshold() {
        let catalog = demo_catalog();

        // quantity 4: below threshold, no bulk discount
        let result = compute_pricing(&cart_with(&catalog, &[(7, 4)]), &catalog);
        assert_eq!(result.bulk_discount, 0.0);

        // quantity 5: 10% of the line subtotal
        let result = compute_pricing(&cart_with(&catalog, &[(7, 5)]), &catalog);
        assert_eq!(result.subtotal, 500.0);
        assert_eq!(result.bulk_discount, 50.0);
    }

    #[test]
    fn test_category_rates() {
        let catalog = demo_catalog();

        // Electronics: 15%
        let result = compute_pricing(&cart_with(&catalog, &[(1, 1)]), &catalog);
        assert_eq!(result.category_discount, 6750.0);

        // Clothing: 20%
        let result = compute_pricing(&cart_with(&catalog, &[(3, 2)]), &catalog);
        assert_eq!(result.category_discount, 200.0);

        // Other categories: no discount
        let result = compute_pricing(&cart_with(&catalog, &[(7, 1)]), &catalog);
        assert_eq!(result.category_discount, 0.0);
        assert_eq!(result.final_total, 100.0);
    }

    #[test]
    fn test_bulk_and_category_stack_on_same_line() {
        let catalog = demo_catalog();

        // 5 T-Shirts: subtotal 2500, bulk 250, category 500
        let result = compute_pricing(&cart_with(&catalog, &[(3, 5)]), &catalog);
        assert_eq!(result.subtotal, 2500.0);
        assert_eq!(result.bulk_discount, 250.0);
        assert_eq!(result.category_discount, 500.0);
        assert_eq!(result.final_total, 1750.0);
    }

    #[test]
    fn test_coupon_applies_to_pre_discount_subtotal() {
        let catalog = demo_catalog();
        let registry = registry("SAVE10", 0.10);
        let mut cart = cart_with(&catalog, &[(1, 1)]);
        cart.apply_coupon(&registry, "SAVE10").unwrap();

        let result = compute_pricing(&cart, &catalog);
        // 10% of 45000, not of the post-category remainder
        assert_eq!(result.coupon_discount, 4500.0);
    }

    #[test]
    fn test_full_scenario() {
        // 6x Laptop (45000, Electronics) + 3x T-Shirt (500, Clothing), SAVE10
        let catalog = demo_catalog();
        let registry = registry("SAVE10", 0.10);
        let mut cart = cart_with(&catalog, &[(1, 6), (3, 3)]);
        cart.apply_coupon(&registry, "SAVE10").unwrap();

        let result = compute_pricing(&cart, &catalog);
        assert_eq!(result.subtotal, 271500.0);
        assert_eq!(result.bulk_discount, 27000.0);
        assert_eq!(result.category_discount, 40800.0); // 40500 + 300
        assert_eq!(result.coupon_discount, 27150.0);
        assert_eq!(result.total_discount, 94950.0);
        assert_eq!(result.final_total, 176550.0);

        // Per-line breakdown
        assert_eq!(result.lines.len(), 2);
        let laptop = &result.lines[0];
        assert_eq!(laptop.line_subtotal, 270000.0);
        assert_eq!(laptop.bulk_discount, 27000.0);
        assert_eq!(laptop.category_discount, 40500.0);
        let shirt = &result.lines[1];
        assert_eq!(shirt.line_subtotal, 1500.0);
        assert_eq!(shirt.bulk_discount, 0.0);
        assert_eq!(shirt.category_discount, 300.0);
    }

    #[test]
    fn test_final_total_clamped_at_zero() {
        // 5 T-Shirts with a 90% coupon: 10% + 20% + 90% = 120% of subtotal
        let catalog = demo_catalog();
        let registry = registry("MEGA", 0.90);
        let mut cart = cart_with(&catalog, &[(3, 5)]);
        cart.apply_coupon(&registry, "MEGA").unwrap();

        let result = compute_pricing(&cart, &catalog);
        assert_eq!(result.subtotal, 2500.0);
        assert_eq!(result.total_discount, 3000.0);
        assert_eq!(result.final_total, 0.0);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let catalog = demo_catalog();
        let registry = registry("SAVE10", 0.10);
        let mut cart = cart_with(&catalog, &[(1, 6), (3, 3)]);
        cart.apply_coupon(&registry, "SAVE10").unwrap();

        let first = compute_pricing(&cart, &catalog);
        let second = compute_pricing(&cart, &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fractional_prices_round_to_cents() {
        let catalog = Catalog::new(vec![Product {
            id: 1,
            name: "Widget".to_string(),
            unit_price: 33.33,
            category: Category::Electronics,
        }])
        .unwrap();
        let cart = cart_with(&catalog, &[(1, 3)]);

        let result = compute_pricing(&cart, &catalog);
        assert_eq!(result.subtotal, 99.99);
        // 15% of 99.99 = 14.9985, rounds half-up to 15.00
        assert_eq!(result.category_discount, 15.0);
        assert_eq!(result.final_total, 84.99);
    }
}
