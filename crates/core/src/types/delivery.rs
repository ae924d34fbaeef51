//! Delivery details collected at checkout.

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating [`DeliveryDetails`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The street address is empty or whitespace.
    #[error("delivery address cannot be empty")]
    MissingAddress,
    /// The city is empty or whitespace.
    #[error("delivery city cannot be empty")]
    MissingCity,
}

/// Where and how an order should be delivered.
///
/// ## Constraints
///
/// - `address` must not be blank after trimming whitespace
/// - `city` must not be blank after trimming whitespace
/// - `zip_code` and `instructions` are optional free text
///
/// ## Examples
///
/// ```
/// use pink_plate_core::{DeliveryDetails, DeliveryError};
///
/// let details = DeliveryDetails::new("12 Mall Road", "Lahore");
/// assert!(details.validate().is_ok());
///
/// let blank = DeliveryDetails::new("   ", "Lahore");
/// assert_eq!(blank.validate(), Err(DeliveryError::MissingAddress));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default, rename = "deliveryInstructions")]
    pub instructions: String,
}

impl DeliveryDetails {
    /// Create delivery details with an address and city.
    #[must_use]
    pub fn new(address: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            zip_code: String::new(),
            instructions: String::new(),
        }
    }

    /// Set the zip code.
    #[must_use]
    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = zip_code.into();
        self
    }

    /// Set free-text notes for the rider.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Check the fields required to dispatch an order.
    ///
    /// # Errors
    ///
    /// Returns the first missing field: address is checked before city.
    pub fn validate(&self) -> Result<(), DeliveryError> {
        if self.address.trim().is_empty() {
            return Err(DeliveryError::MissingAddress);
        }
        if self.city.trim().is_empty() {
            return Err(DeliveryError::MissingCity);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(DeliveryDetails::new("221B Baker Street", "London").validate().is_ok());
    }

    #[test]
    fn test_validate_blank_address() {
        assert_eq!(
            DeliveryDetails::new("", "Delhi").validate(),
            Err(DeliveryError::MissingAddress)
        );
        assert_eq!(
            DeliveryDetails::new(" \t\n", "Delhi").validate(),
            Err(DeliveryError::MissingAddress)
        );
    }

    #[test]
    fn test_validate_blank_city() {
        assert_eq!(
            DeliveryDetails::new("MG Road 4", "  ").validate(),
            Err(DeliveryError::MissingCity)
        );
    }

    #[test]
    fn test_validate_reports_address_first() {
        assert_eq!(
            DeliveryDetails::default().validate(),
            Err(DeliveryError::MissingAddress)
        );
    }

    #[test]
    fn test_optional_fields_not_required() {
        let details = DeliveryDetails::new("MG Road 4", "Pune")
            .with_zip_code("")
            .with_instructions("");
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_deserialize_form_field_names() {
        let details: DeliveryDetails = serde_json::from_str(
            r#"{"address":"1 Main St","city":"Karachi","zipCode":"74000","deliveryInstructions":"Ring twice"}"#,
        )
        .unwrap();
        assert_eq!(details.zip_code, "74000");
        assert_eq!(details.instructions, "Ring twice");
    }
}
