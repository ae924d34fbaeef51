//! Derived cart totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::LineItem;

/// Pricing rules applied when totals are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Subtotals strictly above this amount ship for free.
    pub free_delivery_threshold: Decimal,
    /// Fee charged when the subtotal does not exceed the threshold.
    pub flat_delivery_fee: Decimal,
    /// Tax as a fraction of the subtotal (0.18 = 18%).
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: Decimal::new(500, 0),
            flat_delivery_fee: Decimal::new(49, 0),
            tax_rate: Decimal::new(18, 2),
        }
    }
}

/// An amount left the range a [`Decimal`] can represent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cart amount exceeds the representable range")]
pub struct AmountOverflow;

/// Sum of `unit_price × quantity` over `items`.
///
/// # Errors
///
/// Returns [`AmountOverflow`] if a line total or the running sum overflows.
pub(super) fn checked_subtotal(items: &[LineItem]) -> Result<Decimal, AmountOverflow> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        item.line_total()
            .and_then(|line| acc.checked_add(line))
            .ok_or(AmountOverflow)
    })
}

/// Totals derived from a set of line items. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Derive totals for `items` under `config`.
    ///
    /// Arithmetic is carried at full decimal precision; rounding for display
    /// is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if any intermediate amount overflows.
    pub fn compute(items: &[LineItem], config: &PricingConfig) -> Result<Self, AmountOverflow> {
        let subtotal = checked_subtotal(items)?;
        let delivery_fee = if subtotal > config.free_delivery_threshold {
            Decimal::ZERO
        } else {
            config.flat_delivery_fee
        };
        let tax = subtotal.checked_mul(config.tax_rate).ok_or(AmountOverflow)?;
        let total = subtotal
            .checked_add(delivery_fee)
            .and_then(|sum| sum.checked_add(tax))
            .ok_or(AmountOverflow)?;

        Ok(Self {
            subtotal,
            delivery_fee,
            tax,
            total,
        })
    }

    /// Whether the order qualified for free delivery.
    #[must_use]
    pub fn is_free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}
