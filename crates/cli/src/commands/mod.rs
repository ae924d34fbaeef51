//! Subcommand implementations.

pub mod cart;
pub mod favorites;
pub mod offers;
pub mod reservation;

use pink_plate_core::{CurrencyCode, Price};
use rust_decimal::Decimal;

/// Render an amount in the configured currency.
fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}
