//! Pink Plate Storefront library.
//!
//! Client-side ordering logic for the Pink Plate restaurant front-end:
//!
//! - [`cart`] - the cart ledger: line items, totals, checkout
//! - [`favorites`] - hearted dishes
//! - [`offers`] - search, filter, sort and pagination of offers
//! - [`storage`] - the key-value persistence boundary both of the above write through
//! - [`config`] - pricing rules and data directory from the environment
//!
//! # Example
//!
//! ```rust
//! use std::num::NonZeroU32;
//!
//! use pink_plate_core::{DeliveryDetails, Product, ProductId};
//! use pink_plate_storefront::cart::{CartLedger, CheckoutRequest, PricingConfig};
//! use pink_plate_storefront::storage::MemoryStore;
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartLedger::load(MemoryStore::new());
//! let burger = Product::new(ProductId::new(1), "Classic Cheeseburger", Decimal::new(500, 0));
//! cart.add_or_merge(&burger, NonZeroU32::new(2).unwrap()).unwrap();
//!
//! let totals = cart.compute_totals(&PricingConfig::default()).unwrap();
//! assert_eq!(totals.total, Decimal::new(1180, 0));
//!
//! let request = CheckoutRequest::new(DeliveryDetails::new("12 Mall Road", "Lahore"));
//! let confirmation = cart.confirm(request, &PricingConfig::default()).unwrap();
//! assert!(cart.is_empty());
//! assert_eq!(confirmation.item_count, 2);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod favorites;
pub mod offers;
pub mod storage;

pub use error::{Result, StorefrontError};
