//! Pink Plate Core - Shared types library.
//!
//! This crate provides common types used across all Pink Plate components:
//! - `storefront` - Cart ledger, favorites and offer browsing
//! - `cli` - Command-line front-end driving the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products and extras, delivery details,
//!   checkout choices and table reservations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
