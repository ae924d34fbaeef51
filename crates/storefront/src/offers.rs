//! Offer browsing: search, category filter, sort and pagination.
//!
//! Offers are supplied by the caller; this module only selects and orders
//! them. All operations are single-pass and leave the input untouched.

use pink_plate_core::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories shown as filter chips on the offers page.
pub const OFFER_CATEGORIES: [&str; 5] = ["All", "Combo", "Dessert", "Pizza", "Fast Food"];

/// Errors returned by offer browsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OfferError {
    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("unknown sort order: {0}")]
    UnknownSort(String),
}

/// A discounted dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub original_price: Decimal,
    pub discounted_price: Decimal,
    #[serde(default)]
    pub image: String,
    pub rating: Decimal,
    #[serde(default)]
    pub description: String,
    /// Minutes until the offer expires.
    #[serde(rename = "timeLeft")]
    pub minutes_left: u32,
    pub discount_percentage: u8,
    #[serde(default)]
    pub is_jumbo: bool,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Offer {
    /// The product handed to the cart; it is charged the discounted price.
    #[must_use]
    pub fn to_product(&self) -> Product {
        Product::new(self.id, self.name.clone(), self.original_price)
            .with_category(self.category.clone())
            .with_image(self.image.clone())
            .with_description(self.description.clone())
            .with_offer_price(self.discounted_price)
    }

    /// Countdown text, e.g. `"2h 30m left"`.
    #[must_use]
    pub fn time_left(&self) -> String {
        format_time_left(self.minutes_left)
    }
}

/// Which categories to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_owned())
        }
    }
}

/// Sort order for the offer grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OfferSort {
    /// Source order.
    #[default]
    Default,
    /// Cheapest discounted price first.
    PriceLowHigh,
    /// Most expensive discounted price first.
    PriceHighLow,
    /// Best rated first.
    Rating,
}

impl std::str::FromStr for OfferSort {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "Default" => Ok(Self::Default),
            "price-asc" | "Price: Low-High" => Ok(Self::PriceLowHigh),
            "price-desc" | "Price: High-Low" => Ok(Self::PriceHighLow),
            "rating" | "Rating" => Ok(Self::Rating),
            _ => Err(OfferError::UnknownSort(s.to_owned())),
        }
    }
}

/// Search, filter and sort settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferQuery {
    /// Case-insensitive substring of the offer name. Empty matches all.
    pub search: String,
    pub category: CategoryFilter,
    pub sort: OfferSort,
}

/// Offers matching `query`, in the requested order.
///
/// Sorting is stable, so ties keep their source order.
#[must_use]
pub fn browse<'a>(offers: &'a [Offer], query: &OfferQuery) -> Vec<&'a Offer> {
    let needle = query.search.to_lowercase();
    let mut selected: Vec<&Offer> = offers
        .iter()
        .filter(|offer| offer.name.to_lowercase().contains(&needle))
        .filter(|offer| query.category.matches(&offer.category))
        .collect();

    match query.sort {
        OfferSort::Default => {}
        OfferSort::PriceLowHigh => selected.sort_by(|a, b| a.discounted_price.cmp(&b.discounted_price)),
        OfferSort::PriceHighLow => selected.sort_by(|a, b| b.discounted_price.cmp(&a.discounted_price)),
        OfferSort::Rating => selected.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
    selected
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Slice `items` into pages of `per_page` and return page `page` (1-based).
///
/// Page 0 is served as page 1. Pages past the end come back empty.
///
/// # Errors
///
/// Returns [`OfferError::InvalidPageSize`] if `per_page` is zero.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Result<Page<T>, OfferError> {
    if per_page == 0 {
        return Err(OfferError::InvalidPageSize);
    }
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);

    Ok(Page {
        items: items.iter().skip(start).take(per_page).cloned().collect(),
        page,
        per_page,
        total_items,
        total_pages,
    })
}

/// Offers shown in the hero slider.
#[must_use]
pub fn jumbo_offers<'a>(offers: &[&'a Offer]) -> Vec<&'a Offer> {
    offers.iter().copied().filter(|offer| offer.is_jumbo).collect()
}

/// The offer with `id`, if listed.
#[must_use]
pub fn find_offer(offers: &[Offer], id: ProductId) -> Option<&Offer> {
    offers.iter().find(|offer| offer.id == id)
}

/// Render a minute count as `"{h}h {m}m left"`.
#[must_use]
pub fn format_time_left(minutes: u32) -> String {
    format!("{}h {}m left", minutes / 60, minutes % 60)
}
