//! Offer subcommands.

use std::num::NonZeroU32;
use std::path::Path;

use pink_plate_core::ProductId;
use pink_plate_storefront::config::StorefrontConfig;
use pink_plate_storefront::offers::{
    CategoryFilter, Offer, OfferQuery, OfferSort, browse, find_offer, jumbo_offers, paginate,
};
use pink_plate_storefront::{Result, StorefrontError};
use tracing::debug;

use super::cart::{open, print_cart};
use super::money;

/// Options for `offers list`.
pub struct ListOptions {
    pub search: String,
    pub category: String,
    pub sort: OfferSort,
    pub page: usize,
    pub per_page: usize,
}

/// Load offers from `file`, then filter, sort and print one page.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the sort order is
/// the page size is zero.
pub fn list(
    config: &StorefrontConfig,
    file: &Path,
    options: &ListOptions,
) -> Result<()> {
    let offers = read_offers(file)?;
    let query = OfferQuery {
        search: options.search.clone(),
        category: CategoryFilter::from(options.category.as_str()),
        sort: options.sort,
    };

    let selected = browse(&offers, &query);
    debug!(total = offers.len(), matched = selected.len(), "Offers filtered");

    let jumbo = jumbo_offers(&selected);
    if !jumbo.is_empty() {
        println!("Jumbo deals:");
        for offer in jumbo {
            println!("  * {} ({}% off)", offer.name, offer.discount_percentage);
        }
        println!();
    }

    let page = paginate(&selected, options.page, options.per_page)?;
    if page.items.is_empty() {
        println!("No offers found");
        return Ok(());
    }

    let currency = config.currency;
    for offer in &page.items {
        println!(
            "{:>4}  {:<32} {:>10} (was {}) {:>3}% off  {}  {}",
            offer.id,
            offer.name,
            money(offer.discounted_price, currency),
            money(offer.original_price, currency),
            offer.discount_percentage,
            offer.rating,
            offer.time_left()
        );
    }
    println!();
    println!(
        "Page {} of {} ({} offers)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    );
    Ok(())
}

/// Put the offer `id` from `file` into the cart at its discounted price.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, no offer has that
/// id, or the cart cannot be updated.
pub fn add(
    config: &StorefrontConfig,
    file: &Path,
    id: ProductId,
    quantity: NonZeroU32,
) -> Result<()> {
    let offers = read_offers(file)?;
    let offer = find_offer(&offers, id)
        .ok_or_else(|| StorefrontError::InvalidInput(format!("no offer with id {id}")))?;
    debug!(%id, name = %offer.name, "Offer found");

    let mut cart = open(config);
    cart.add_or_merge(&offer.to_product(), quantity)?;
    print_cart(&cart, config)
}

fn read_offers(path: &Path) -> Result<Vec<Offer>> {
    let raw = std::fs::read_to_string(path).map_err(|source| StorefrontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        StorefrontError::InvalidInput(format!("failed to parse offers in {}: {e}", path.display()))
    })
}
