//! Catalog product as handed to the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product offered by a browsing surface (menu or offers).
///
/// The cart copies these fields when a product is first added and never
/// looks the product up again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: String,
    pub description: String,
    /// Regular menu price.
    pub list_price: Decimal,
    /// Discounted price while the product is on offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_price: Option<Decimal>,
}

impl Product {
    /// Create a product at its list price with empty descriptive fields.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, list_price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            category: String::new(),
            image: String::new(),
            description: String::new(),
            list_price,
            offer_price: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Put the product on offer at `price`.
    #[must_use]
    pub fn with_offer_price(mut self, price: Decimal) -> Self {
        self.offer_price = Some(price);
        self
    }

    /// Price charged when the product is added to a cart right now.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.offer_price.unwrap_or(self.list_price)
    }

    /// Whether the product currently carries a discount.
    #[must_use]
    pub const fn is_on_offer(&self) -> bool {
        self.offer_price.is_some()
    }
}
