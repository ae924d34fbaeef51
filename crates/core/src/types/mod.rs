//! Core types for Pink Plate.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customization;
pub mod delivery;
pub mod id;
pub mod price;
pub mod product;
pub mod reservation;
pub mod status;

pub use customization::Customizations;
pub use delivery::{DeliveryDetails, DeliveryError};
pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use product::Product;
pub use reservation::{RESERVATION_TIME_SLOTS, ReservationError, ReservationRequest};
pub use status::*;
