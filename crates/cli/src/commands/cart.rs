//! Cart subcommands.
//!
//! Every command loads the ledger from the file store, applies one operation
//! and lets the ledger write the new snapshot through.

use std::num::NonZeroU32;

use pink_plate_core::{
    Customizations, DeliveryDetails, DeliverySlot, PaymentMethod, Product, ProductId,
};
use pink_plate_storefront::Result;
use pink_plate_storefront::cart::{CartLedger, CheckoutRequest, QuantityAction};
use pink_plate_storefront::config::StorefrontConfig;
use pink_plate_storefront::storage::FileStore;

use super::money;

pub(crate) fn open(config: &StorefrontConfig) -> CartLedger<FileStore> {
    CartLedger::load(FileStore::new(&config.data_dir))
}

/// Print line items and totals.
///
/// # Errors
///
/// Returns an error if the totals exceed the representable range.
pub fn show(config: &StorefrontConfig) -> Result<()> {
    let cart = open(config);
    print_cart(&cart, config)
}

/// Add a product with optional extras, merging with an existing line.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written or the amounts overflow.
pub fn add(
    config: &StorefrontConfig,
    product: &Product,
    customizations: Customizations,
    quantity: NonZeroU32,
) -> Result<()> {
    let mut cart = open(config);
    cart.add_customized(product, customizations, quantity)?;
    print_cart(&cart, config)
}

/// Move a line's quantity one step.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub fn step(
    config: &StorefrontConfig,
    id: ProductId,
    action: QuantityAction,
) -> Result<()> {
    let mut cart = open(config);
    cart.set_quantity(id, action)?;
    print_cart(&cart, config)
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub fn remove(config: &StorefrontConfig, id: ProductId) -> Result<()> {
    let mut cart = open(config);
    cart.remove(id)?;
    print_cart(&cart, config)
}

/// Replace a line's special instructions.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub fn note(config: &StorefrontConfig, id: ProductId, text: &str) -> Result<()> {
    let mut cart = open(config);
    cart.set_special_instructions(id, text)?;
    print_cart(&cart, config)
}

/// Confirm the order and clear the cart.
///
/// # Errors
///
/// Returns an error if the address or city is blank, or if the stored
/// snapshot cannot be removed.
pub fn confirm(
    config: &StorefrontConfig,
    details: DeliveryDetails,
    payment: PaymentMethod,
    slot: DeliverySlot,
) -> Result<()> {
    let mut cart = open(config);
    let mut request = CheckoutRequest::new(details);
    request.payment = payment;
    request.slot = slot;

    let confirmation = cart.confirm(request, &config.pricing)?;

    let currency = config.currency;
    println!("Order {} confirmed", confirmation.order_id);
    println!(
        "  {} item(s), total {}",
        confirmation.item_count,
        money(confirmation.totals.total, currency)
    );
    println!("  Payment: {}", confirmation.payment.label());
    println!("  Delivery: {}", confirmation.slot.label());
    println!(
        "  Arriving in about {} minutes ({})",
        confirmation.estimated_minutes,
        confirmation.estimated_arrival.format("%H:%M UTC")
    );
    Ok(())
}

pub(crate) fn print_cart(cart: &CartLedger<FileStore>, config: &StorefrontConfig) -> Result<()> {
    let currency = config.currency;

    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    let totals = cart.compute_totals(&config.pricing)?;
    for item in cart.items() {
        let line_total = item
            .line_total()
            .map_or_else(|| "n/a".to_owned(), |amount| money(amount, currency));
        println!(
            "{:>4}  {:<32} {:>3} x {:>10} = {:>10}",
            item.id,
            item.name,
            item.quantity,
            money(item.unit_price, currency),
            line_total
        );
        let extras = item.customizations.labels();
        if !extras.is_empty() {
            println!("      extras: {}", extras.join(", "));
        }
        if !item.special_instructions.is_empty() {
            println!("      note: {}", item.special_instructions);
        }
    }

    println!();
    println!("Subtotal ({} items): {}", cart.item_count(), money(totals.subtotal, currency));
    if totals.is_free_delivery() {
        println!("Delivery: Free");
    } else {
        println!("Delivery: {}", money(totals.delivery_fee, currency));
    }
    println!("Tax: {}", money(totals.tax, currency));
    println!("Total: {}", money(totals.total, currency));
    Ok(())
}
