//! Per-line dish extras and their surcharges.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Extras picked on the order page. Each one adds a fixed amount per unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customizations {
    pub extra_cheese: bool,
    pub spicy: bool,
    pub extra_sauce: bool,
}

impl Customizations {
    /// Surcharge for extra cheese (1.50).
    pub const EXTRA_CHEESE: Decimal = Decimal::from_parts(150, 0, 0, false, 2);
    /// Surcharge for spicy (0.50).
    pub const SPICY: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
    /// Surcharge for extra sauce (0.75).
    pub const EXTRA_SAUCE: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

    /// No extras.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            extra_cheese: false,
            spicy: false,
            extra_sauce: false,
        }
    }

    /// Whether no extra is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.extra_cheese || self.spicy || self.extra_sauce)
    }

    /// Amount added to the unit price.
    #[must_use]
    pub fn surcharge(&self) -> Decimal {
        [
            (self.extra_cheese, Self::EXTRA_CHEESE),
            (self.spicy, Self::SPICY),
            (self.extra_sauce, Self::EXTRA_SAUCE),
        ]
        .into_iter()
        .filter_map(|(selected, cost)| selected.then_some(cost))
        .sum()
    }

    /// Short labels of the selected extras, e.g. `["extra cheese", "spicy"]`.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.extra_cheese, "extra cheese"),
            (self.spicy, "spicy"),
            (self.extra_sauce, "extra sauce"),
        ]
        .into_iter()
        .filter_map(|(selected, label)| selected.then_some(label))
        .collect()
    }
}
