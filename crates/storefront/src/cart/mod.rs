//! The cart ledger.
//!
//! [`CartLedger`] owns the line items of one cart and is the only way to
//! change them. Every mutation is written through to the backing
//! [`KeyValueStore`] under [`CART_KEY`] before it becomes visible: the next
//! item list is built, serialized and stored, and only then swapped in. If
//! the store rejects the write the ledger is left exactly as it was.
//!
//! Totals are never stored; [`CartLedger::compute_totals`] derives them from
//! the current items on every call.

mod checkout;
mod line_item;
mod totals;

pub use checkout::{CheckoutRequest, DELIVERY_ESTIMATE_MINUTES, OrderConfirmation};
pub use line_item::{LineItem, QuantityAction};
pub use totals::{AmountOverflow, CartTotals, PricingConfig};

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use pink_plate_core::{Customizations, DeliveryError, Product, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::storage::{self, CART_KEY, KeyValueStore, StorageError};

/// Errors returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout details failed validation; nothing was changed.
    #[error("invalid delivery details: {0}")]
    Validation(#[from] DeliveryError),

    /// The snapshot could not be written; nothing was changed.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),

    /// The snapshot could not be encoded.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A line or cart total would overflow; nothing was changed.
    #[error(transparent)]
    Overflow(#[from] AmountOverflow),
}

/// A shopping cart with write-through persistence.
#[derive(Debug)]
pub struct CartLedger<S> {
    store: S,
    items: Vec<LineItem>,
}

impl<S: KeyValueStore> CartLedger<S> {
    /// Rehydrate the cart from `store`.
    ///
    /// An absent, unreadable or malformed snapshot yields an empty cart.
    /// Snapshot entries sharing an id are merged.
    pub fn load(store: S) -> Self {
        let items = storage::read_or_absent(&store, CART_KEY)
            .map_or_else(Vec::new, |raw| parse_snapshot(&raw));
        debug!(lines = items.len(), "Cart loaded");
        Self { store, items }
    }

    /// Current line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across all line items (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity.get()))
    }

    /// `unit_price × quantity` for `id`, if present.
    #[must_use]
    pub fn line_total(&self, id: ProductId) -> Option<Decimal> {
        self.get(id).and_then(LineItem::line_total)
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the ledger, returning the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart only its quantity grows; the
    /// price recorded on first add is kept. Otherwise a new line is created
    /// at the product's effective price.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart total would overflow or the snapshot
    /// could not be persisted.
    pub fn add_or_merge(&mut self, product: &Product, quantity: NonZeroU32) -> Result<(), CartError> {
        self.add_customized(product, Customizations::none(), quantity)
    }

    /// Add `quantity` units of `product` with extras.
    ///
    /// A new line is priced at the effective price plus the extras'
    /// surcharge. Lines are keyed by product id alone, so adding a product
    /// already in the cart only grows its quantity and keeps the extras and
    /// price of the first add.
    ///
    /// # Errors
    ///
    /// See [`CartLedger::add_or_merge`].
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_customized(
        &mut self,
        product: &Product,
        customizations: Customizations,
        quantity: NonZeroU32,
    ) -> Result<(), CartError> {
        let mut next = self.items.clone();
        line_item::merge_into(
            &mut next,
            LineItem::customized(product, customizations, quantity),
        );
        self.commit(next)?;
        info!(quantity = quantity.get(), "Added to cart");
        Ok(())
    }

    /// Step the quantity of `id` up or down by one. Decrease stops at one.
    ///
    /// Unknown ids are ignored; the unchanged cart is still persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be persisted.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, id: ProductId, action: QuantityAction) -> Result<(), CartError> {
        let mut next = self.items.clone();
        match next.iter_mut().find(|item| item.id == id) {
            Some(item) => item.quantity = action.apply(item.quantity),
            None => debug!("Quantity change for product not in cart"),
        }
        self.commit(next)
    }

    /// Remove the line for `id`. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be persisted.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: ProductId) -> Result<(), CartError> {
        let mut next = self.items.clone();
        let before = next.len();
        next.retain(|item| item.id != id);
        if next.len() == before {
            debug!("Remove for product not in cart");
        }
        self.commit(next)
    }

    /// Overwrite the special instructions of the line for `id` only.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be persisted.
    #[instrument(skip(self, text))]
    pub fn set_special_instructions(
        &mut self,
        id: ProductId,
        text: impl Into<String>,
    ) -> Result<(), CartError> {
        let mut next = self.items.clone();
        match next.iter_mut().find(|item| item.id == id) {
            Some(item) => item.special_instructions = text.into(),
            None => debug!("Instructions for product not in cart"),
        }
        self.commit(next)
    }

    /// Derive totals for the current items. Pure.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if `config` pushes the tax or total
    /// out of range.
    pub fn compute_totals(&self, config: &PricingConfig) -> Result<CartTotals, CartError> {
        Ok(CartTotals::compute(&self.items, config)?)
    }

    /// Place the order using the thread RNG and the current time.
    ///
    /// # Errors
    ///
    /// See [`CartLedger::confirm_with`].
    pub fn confirm(
        &mut self,
        request: CheckoutRequest,
        config: &PricingConfig,
    ) -> Result<OrderConfirmation, CartError> {
        self.confirm_with(request, config, &mut rand::rng(), Utc::now())
    }

    /// Place the order.
    ///
    /// Validates the delivery details, then clears both the stored snapshot
    /// and the in-memory items. An empty cart may be confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Validation`] if the address or city is blank and
    /// [`CartError::Storage`] if the snapshot could not be removed. In both
    /// cases the cart is unchanged. [`CartError::Overflow`] if the totals
    /// cannot be computed.
    #[instrument(skip_all)]
    pub fn confirm_with<R: rand::Rng + ?Sized>(
        &mut self,
        request: CheckoutRequest,
        config: &PricingConfig,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<OrderConfirmation, CartError> {
        if let Err(e) = request.details.validate() {
            warn!(error = %e, "Order rejected");
            return Err(e.into());
        }

        let totals = self.compute_totals(config)?;
        let item_count = self.item_count();

        self.store.remove(CART_KEY)?;
        self.items.clear();

        let (order_id, estimated_minutes, estimated_arrival) = checkout::estimate(rng, now);
        info!(
            order_id = %order_id,
            estimated_minutes,
            total = %totals.total,
            item_count,
            "Order confirmed"
        );

        Ok(OrderConfirmation {
            order_id,
            estimated_minutes,
            estimated_arrival,
            totals,
            item_count,
            payment: request.payment,
            slot: request.slot,
            details: request.details,
        })
    }

    fn commit(&mut self, next: Vec<LineItem>) -> Result<(), CartError> {
        totals::checked_subtotal(&next)?;
        let snapshot = serde_json::to_string(&next)?;
        self.store.set(CART_KEY, &snapshot)?;
        self.items = next;
        Ok(())
    }
}

fn parse_snapshot(raw: &str) -> Vec<LineItem> {
    match serde_json::from_str::<Vec<LineItem>>(raw) {
        Ok(stored) => {
            let items = stored.into_iter().fold(Vec::new(), |mut items, item| {
                line_item::merge_into(&mut items, item);
                items
            });
            if totals::checked_subtotal(&items).is_err() {
                warn!("Discarding cart snapshot with out-of-range amounts");
                return Vec::new();
            }
            items
        }
        Err(e) => {
            warn!(error = %e, "Discarding malformed cart snapshot");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use chrono::Duration;
    use pink_plate_core::DeliveryDetails;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::storage::MemoryStore;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn product(id: i32, price: i64) -> Product {
        Product::new(ProductId::new(id), format!("dish-{id}"), Decimal::new(price, 0))
    }

    fn ledger() -> CartLedger<MemoryStore> {
        CartLedger::load(MemoryStore::new())
    }

    fn stored(ledger: &CartLedger<MemoryStore>) -> Option<Vec<LineItem>> {
        ledger
            .store()
            .get(CART_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    /// Store that accepts reads and refuses every write.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_owned(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.set(key, "")
        }
    }

    #[test]
    fn test_add_new_product() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 500), qty(2)).unwrap();

        assert_eq!(cart.len(), 1);
        let item = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.unit_price, Decimal::new(500, 0));
    }

    #[test]
    fn test_add_offer_uses_discounted_price() {
        let mut cart = ledger();
        let offer = product(5, 2999).with_offer_price(Decimal::new(1599, 0));
        cart.add_or_merge(&offer, qty(1)).unwrap();
        assert_eq!(
            cart.get(ProductId::new(5)).unwrap().unit_price,
            Decimal::new(1599, 0)
        );
    }

    #[test]
    fn test_add_existing_merges() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 200), qty(1)).unwrap();
        cart.add_or_merge(&product(1, 999), qty(2)).unwrap();

        assert_eq!(cart.len(), 1);
        let item = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(item.quantity.get(), 3);
        assert_eq!(item.unit_price, Decimal::new(200, 0));
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(1)).unwrap();
        assert_eq!(stored(&cart).unwrap(), cart.items());

        cart.set_quantity(ProductId::new(1), QuantityAction::Increase)
            .unwrap();
        assert_eq!(stored(&cart).unwrap(), cart.items());

        cart.set_special_instructions(ProductId::new(1), "no onions")
            .unwrap();
        assert_eq!(stored(&cart).unwrap(), cart.items());

        cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(stored(&cart).unwrap(), Vec::<LineItem>::new());
    }

    #[test]
    fn test_decrease_never_below_one() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(2)).unwrap();
        for _ in 0..5 {
            cart.set_quantity(ProductId::new(1), QuantityAction::Decrease)
                .unwrap();
        }
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_unknown_id_persists_unchanged() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(1)).unwrap();
        let before = cart.items().to_vec();

        cart.set_quantity(ProductId::new(99), QuantityAction::Increase)
            .unwrap();
        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(stored(&cart).unwrap(), before);
    }

    #[test]
    fn test_set_quantity_on_empty_cart_writes_empty_snapshot() {
        let mut cart = ledger();
        cart.set_quantity(ProductId::new(1), QuantityAction::Decrease)
            .unwrap();
        assert_eq!(stored(&cart).unwrap(), Vec::<LineItem>::new());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(1)).unwrap();
        cart.add_or_merge(&product(2, 100), qty(1)).unwrap();

        cart.remove(ProductId::new(1)).unwrap();
        cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.get(ProductId::new(2)).is_some());
    }

    #[test]
    fn test_special_instructions_only_touch_target() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(1)).unwrap();
        cart.add_or_merge(&product(2, 100), qty(1)).unwrap();
        cart.set_special_instructions(ProductId::new(2), "extra spicy")
            .unwrap();

        assert_eq!(
            cart.get(ProductId::new(2)).unwrap().special_instructions,
            "extra spicy"
        );
        assert!(
            cart.get(ProductId::new(1))
                .unwrap()
                .special_instructions
                .is_empty()
        );
    }

    #[test]
    fn test_item_count_and_line_total() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 150), qty(2)).unwrap();
        cart.add_or_merge(&product(2, 80), qty(3)).unwrap();
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.line_total(ProductId::new(2)), Some(Decimal::new(240, 0)));
        assert_eq!(cart.line_total(ProductId::new(3)), None);
    }

    #[test]
    fn test_load_roundtrip() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(2)).unwrap();
        cart.add_or_merge(&product(2, 55), qty(1)).unwrap();
        cart.set_special_instructions(ProductId::new(2), "well done")
            .unwrap();
        let items = cart.items().to_vec();

        let reloaded = CartLedger::load(cart.into_store());
        assert_eq!(reloaded.items(), items.as_slice());
    }

    #[test]
    fn test_load_malformed_snapshot_is_empty() {
        for raw in ["", "not json", "{\"id\":1}", "[{\"id\":1}]", "null"] {
            let cart = CartLedger::load(MemoryStore::with_value(CART_KEY, raw));
            assert!(cart.is_empty(), "snapshot {raw:?} should load empty");
        }
    }

    #[test]
    fn test_load_merges_duplicate_ids() {
        let raw = r#"[
            {"id":1,"name":"a","price":100,"quantity":1},
            {"id":1,"name":"a","price":80,"quantity":2}
        ]"#;
        let cart = CartLedger::load(MemoryStore::with_value(CART_KEY, raw));
        assert_eq!(cart.len(), 1);
        let item = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(item.quantity.get(), 3);
        assert_eq!(item.unit_price, Decimal::new(100, 0));
    }

    #[test]
    fn test_load_out_of_range_snapshot_is_empty() {
        let raw = r#"[{"id":1,"name":"a","price":"79228162514264337593543950335","quantity":2}]"#;
        let cart = CartLedger::load(MemoryStore::with_value(CART_KEY, raw));
        assert!(cart.is_empty());
        assert_eq!(
            cart.compute_totals(&PricingConfig::default()).unwrap().subtotal,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_overflowing_add_is_rejected() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(1)).unwrap();
        let before = cart.items().to_vec();

        let huge = Product::new(ProductId::new(2), "gold-plated", Decimal::MAX);
        assert!(matches!(
            cart.add_or_merge(&huge, qty(2)),
            Err(CartError::Overflow(_))
        ));
        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(stored(&cart).unwrap(), before);
    }

    #[test]
    fn test_overflowing_increase_is_rejected() {
        let mut cart = ledger();
        let huge = Product::new(ProductId::new(1), "gold-plated", Decimal::MAX);
        cart.add_or_merge(&huge, qty(1)).unwrap();

        assert!(matches!(
            cart.set_quantity(ProductId::new(1), QuantityAction::Increase),
            Err(CartError::Overflow(_))
        ));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 1);
    }

    #[test]
    fn test_overflowing_tax_is_an_error_not_a_panic() {
        let mut cart = ledger();
        let price = Decimal::from_i128_with_scale(40_000_000_000_000_000_000_000_000_000, 0);
        cart.add_or_merge(&Product::new(ProductId::new(1), "gold-plated", price), qty(1))
            .unwrap();

        let result = cart.compute_totals(&PricingConfig::default());
        assert!(result.is_ok());

        let steep = PricingConfig {
            tax_rate: Decimal::new(2, 0),
            ..PricingConfig::default()
        };
        assert!(matches!(cart.compute_totals(&steep), Err(CartError::Overflow(_))));
        let request = CheckoutRequest::new(DeliveryDetails::new("1 Main St", "Pune"));
        assert!(matches!(cart.confirm(request, &steep), Err(CartError::Overflow(_))));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_customized_charges_extras() {
        let mut cart = ledger();
        let extras = Customizations {
            extra_cheese: true,
            extra_sauce: true,
            ..Customizations::none()
        };
        cart.add_customized(&product(1, 10), extras, qty(2)).unwrap();
        cart.add_or_merge(&product(1, 10), qty(1)).unwrap();

        let item = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(item.quantity.get(), 3);
        assert_eq!(item.customizations, extras);
        // (10 + 1.50 + 0.75) × 3
        assert_eq!(cart.line_total(ProductId::new(1)), Some(Decimal::new(3675, 2)));
        assert_eq!(stored(&cart).unwrap(), cart.items());
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let seeded = r#"[{"id":1,"name":"a","price":100,"quantity":2}]"#;
        let mut cart = CartLedger::load(ReadOnlyStore(MemoryStore::with_value(CART_KEY, seeded)));
        let before = cart.items().to_vec();

        assert!(matches!(
            cart.add_or_merge(&product(2, 10), qty(1)),
            Err(CartError::Storage(_))
        ));
        assert!(cart.set_quantity(ProductId::new(1), QuantityAction::Increase).is_err());
        assert!(cart.remove(ProductId::new(1)).is_err());
        assert_eq!(cart.items(), before.as_slice());

        let request = CheckoutRequest::new(DeliveryDetails::new("1 Main St", "Pune"));
        assert!(matches!(
            cart.confirm(request, &PricingConfig::default()),
            Err(CartError::Storage(_))
        ));
        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_confirm_blank_address_rejected() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 100), qty(1)).unwrap();
        let before = cart.items().to_vec();

        let request = CheckoutRequest::new(DeliveryDetails::new("  ", "Pune"));
        let result = cart.confirm(request, &PricingConfig::default());

        assert!(matches!(
            result,
            Err(CartError::Validation(DeliveryError::MissingAddress))
        ));
        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(stored(&cart).unwrap(), before);
    }

    #[test]
    fn test_confirm_blank_city_rejected() {
        let mut cart = ledger();
        let request = CheckoutRequest::new(DeliveryDetails::new("1 Main St", ""));
        assert!(matches!(
            cart.confirm(request, &PricingConfig::default()),
            Err(CartError::Validation(DeliveryError::MissingCity))
        ));
    }

    #[test]
    fn test_confirm_clears_cart_and_snapshot() {
        let mut cart = ledger();
        cart.add_or_merge(&product(1, 500), qty(2)).unwrap();

        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(42);
        let request = CheckoutRequest::new(DeliveryDetails::new("1 Main St", "Pune"));
        let confirmation = cart
            .confirm_with(request, &PricingConfig::default(), &mut rng, now)
            .unwrap();

        assert!(cart.is_empty());
        assert!(cart.store().get(CART_KEY).unwrap().is_none());
        assert_eq!(confirmation.totals.total, Decimal::new(1180, 0));
        assert_eq!(confirmation.item_count, 2);
        assert!(DELIVERY_ESTIMATE_MINUTES.contains(&confirmation.estimated_minutes));
        assert_eq!(
            confirmation.estimated_arrival,
            now + Duration::minutes(i64::from(confirmation.estimated_minutes))
        );
        assert_eq!(confirmation.details.city, "Pune");
    }

    #[test]
    fn test_confirm_empty_cart_allowed() {
        let mut cart = ledger();
        let request = CheckoutRequest::new(DeliveryDetails::new("1 Main St", "Pune"));
        let confirmation = cart.confirm(request, &PricingConfig::default()).unwrap();
        assert_eq!(confirmation.item_count, 0);
        assert_eq!(confirmation.totals.total, Decimal::new(49, 0));
    }
}
