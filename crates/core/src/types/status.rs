//! Checkout choice enums.

use serde::{Deserialize, Serialize};

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    CreditCard,
    /// `PayPal` wallet.
    Paypal,
    /// Cash handed to the rider.
    Cod,
}

impl PaymentMethod {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit/Debit Card",
            Self::Paypal => "PayPal",
            Self::Cod => "Cash on Delivery",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "credit-card"),
            Self::Paypal => write!(f, "paypal"),
            Self::Cod => write!(f, "cod"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit-card" | "card" => Ok(Self::CreditCard),
            "paypal" => Ok(Self::Paypal),
            "cod" | "cash" => Ok(Self::Cod),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Requested delivery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliverySlot {
    /// As soon as possible (20-40 minutes).
    #[default]
    Asap,
    /// 12:00 PM - 12:30 PM.
    Noon,
    /// 12:30 PM - 1:00 PM.
    HalfPastNoon,
    /// 1:00 PM - 1:30 PM.
    OnePm,
}

impl DeliverySlot {
    /// Every slot, in the order they are offered.
    pub const ALL: [Self; 4] = [Self::Asap, Self::Noon, Self::HalfPastNoon, Self::OnePm];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Asap => "ASAP (20-40 mins)",
            Self::Noon => "12:00 PM - 12:30 PM",
            Self::HalfPastNoon => "12:30 PM - 1:00 PM",
            Self::OnePm => "1:00 PM - 1:30 PM",
        }
    }
}

impl std::fmt::Display for DeliverySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asap => write!(f, "asap"),
            Self::Noon => write!(f, "12:00"),
            Self::HalfPastNoon => write!(f, "12:30"),
            Self::OnePm => write!(f, "13:00"),
        }
    }
}

impl std::str::FromStr for DeliverySlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asap" => Ok(Self::Asap),
            "12:00" => Ok(Self::Noon),
            "12:30" => Ok(Self::HalfPastNoon),
            "13:00" => Ok(Self::OnePm),
            _ => Err(format!("invalid delivery slot: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_roundtrip() {
        for method in [PaymentMethod::CreditCard, PaymentMethod::Paypal, PaymentMethod::Cod] {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cod);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"credit-card\"");
    }

    #[test]
    fn test_delivery_slot_roundtrip() {
        for slot in DeliverySlot::ALL {
            assert_eq!(slot.to_string().parse::<DeliverySlot>().unwrap(), slot);
        }
        assert!("midnight".parse::<DeliverySlot>().is_err());
    }

    #[test]
    fn test_delivery_slot_labels() {
        assert_eq!(DeliverySlot::default().label(), "ASAP (20-40 mins)");
        assert_eq!(DeliverySlot::OnePm.label(), "1:00 PM - 1:30 PM");
    }
}
