//! Integration tests for Pink Plate.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pink-plate-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_ledger` - cart operations end to end, plus property tests
//! - `file_store` - persistence across ledger instances on disk
//!
//! This library holds the menu fixtures shared by those tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::num::NonZeroU32;

use pink_plate_core::{Product, ProductId};
use rust_decimal::Decimal;

/// `Classic Cheeseburger` at 500.
#[must_use]
pub fn burger() -> Product {
    Product::new(ProductId::new(1), "Classic Cheeseburger", Decimal::new(500, 0))
        .with_category("Fast Food")
        .with_image("/images/burger.jpg")
}

/// `Loaded Fries` at 200.
#[must_use]
pub fn fries() -> Product {
    Product::new(ProductId::new(2), "Loaded Fries", Decimal::new(200, 0)).with_category("Fast Food")
}

/// `Chocolate Lava Cake`, listed at 150 and on offer at 85.
#[must_use]
pub fn lava_cake() -> Product {
    Product::new(ProductId::new(8), "Chocolate Lava Cake", Decimal::new(150, 0))
        .with_category("Dessert")
        .with_offer_price(Decimal::new(85, 0))
}

/// Non-zero quantity shorthand. Zero is clamped to one.
#[must_use]
pub fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

/// A cart snapshot as the browser front-end writes it: numeric prices and
/// extra presentation fields alongside the line item fields.
pub const BROWSER_SNAPSHOT: &str = r#"[
  {
    "id": 1,
    "name": "Classic Cheeseburger",
    "category": "Fast Food",
    "price": 299,
    "originalPrice": 399,
    "image": "/images/burger.jpg",
    "description": "Beef patty, cheddar, pickles",
    "rating": 4.5,
    "quantity": 2,
    "specialInstructions": "no onions"
  },
  {
    "id": 8,
    "name": "Chocolate Lava Cake",
    "category": "Dessert",
    "price": 85.5,
    "image": "/images/cake.jpg",
    "description": "Warm centre",
    "quantity": 1
  }
]"#;
