//! Order confirmation types.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use pink_plate_core::{DeliveryDetails, DeliverySlot, PaymentMethod};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CartTotals;

/// Range the delivery estimate is drawn from, in minutes.
pub const DELIVERY_ESTIMATE_MINUTES: RangeInclusive<u32> = 20..=50;

/// Everything the customer supplies when placing an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub details: DeliveryDetails,
    #[serde(default)]
    pub payment: PaymentMethod,
    #[serde(default)]
    pub slot: DeliverySlot,
}

impl CheckoutRequest {
    /// Checkout with default payment method and slot.
    #[must_use]
    pub fn new(details: DeliveryDetails) -> Self {
        Self {
            details,
            payment: PaymentMethod::default(),
            slot: DeliverySlot::default(),
        }
    }
}

/// Receipt for a confirmed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub estimated_minutes: u32,
    pub estimated_arrival: DateTime<Utc>,
    /// Totals charged, computed before the cart was cleared.
    pub totals: CartTotals,
    /// Units across all line items.
    pub item_count: u32,
    pub payment: PaymentMethod,
    pub slot: DeliverySlot,
    pub details: DeliveryDetails,
}

/// Draw an order id and delivery estimate.
pub(super) fn estimate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> (Uuid, u32, DateTime<Utc>) {
    let order_id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
    let minutes = rng.random_range(DELIVERY_ESTIMATE_MINUTES);
    let arrival = now + Duration::minutes(i64::from(minutes));
    (order_id, minutes, arrival)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_estimate_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        for _ in 0..200 {
            let (_, minutes, arrival) = estimate(&mut rng, now);
            assert!(DELIVERY_ESTIMATE_MINUTES.contains(&minutes));
            assert_eq!(arrival - now, Duration::minutes(i64::from(minutes)));
        }
    }

    #[test]
    fn test_estimate_order_ids_are_v4() {
        let mut rng = StdRng::seed_from_u64(11);
        let (first, _, _) = estimate(&mut rng, Utc::now());
        let (second, _, _) = estimate(&mut rng, Utc::now());
        assert_eq!(first.get_version_num(), 4);
        assert_ne!(first, second);
    }

    #[test]
    fn test_checkout_request_defaults() {
        let request = CheckoutRequest::new(DeliveryDetails::new("1 Main St", "Pune"));
        assert_eq!(request.payment, PaymentMethod::CreditCard);
        assert_eq!(request.slot, DeliverySlot::Asap);
    }
}
