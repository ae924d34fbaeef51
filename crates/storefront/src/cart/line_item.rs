//! Cart line items and their snapshot encoding.

use std::num::NonZeroU32;

use pink_plate_core::{Customizations, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product and its quantity in the cart.
///
/// Serialized with the field names the browser front-end already stores
/// under the `cart` key, so existing snapshots keep loading. Extra fields in
/// a snapshot (ratings, original prices) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Price per unit including extras, fixed when the product was first added.
    #[serde(rename = "price", alias = "unitPrice")]
    pub unit_price: Decimal,
    pub quantity: NonZeroU32,
    #[serde(default, skip_serializing_if = "Customizations::is_empty")]
    pub customizations: Customizations,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub special_instructions: String,
}

impl LineItem {
    /// Create a line item from a product at its current effective price.
    #[must_use]
    pub fn from_product(product: &Product, quantity: NonZeroU32) -> Self {
        Self::customized(product, Customizations::none(), quantity)
    }

    /// Create a line item with extras; each unit costs the effective price
    /// plus the extras' surcharge.
    #[must_use]
    pub fn customized(product: &Product, customizations: Customizations, quantity: NonZeroU32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            unit_price: product
                .effective_price()
                .saturating_add(customizations.surcharge()),
            quantity,
            customizations,
            special_instructions: String::new(),
        }
    }

    /// `unit_price × quantity`, or `None` if the product overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity.get()))
    }
}

/// Which way a quantity button moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityAction {
    Increase,
    Decrease,
}

impl QuantityAction {
    /// Apply to a quantity. Decrease stops at one.
    #[must_use]
    pub fn apply(self, quantity: NonZeroU32) -> NonZeroU32 {
        match self {
            Self::Increase => quantity.saturating_add(1),
            Self::Decrease => NonZeroU32::new(quantity.get() - 1).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Fold `item` into `items`, merging on id.
///
/// An existing entry keeps its price, extras and descriptive fields and only
/// gains quantity.
pub(super) fn merge_into(items: &mut Vec<LineItem>, item: LineItem) {
    match items.iter_mut().find(|existing| existing.id == item.id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity.get()),
        None => items.push(item),
    }
}
