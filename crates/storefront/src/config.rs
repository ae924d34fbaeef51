//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PINK_PLATE_DATA_DIR` - Directory holding persisted state (default: .pink-plate)
//! - `PINK_PLATE_FREE_DELIVERY_THRESHOLD` - Subtotal above which delivery is free (default: 500)
//! - `PINK_PLATE_DELIVERY_FEE` - Flat delivery fee (default: 49)
//! - `PINK_PLATE_TAX_RATE` - Tax as a fraction of the subtotal (default: 0.18)
//! - `PINK_PLATE_CURRENCY` - ISO 4217 code used for display (default: PKR)

use std::path::PathBuf;
use std::str::FromStr;

use pink_plate_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::PricingConfig;

const DEFAULT_DATA_DIR: &str = ".pink-plate";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Delivery fee and tax rules
    pub pricing: PricingConfig,
    /// Currency used when rendering amounts
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pricing: PricingConfig::default(),
            currency: CurrencyCode::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or
    /// if an amount is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("PINK_PLATE_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let pricing = PricingConfig {
            free_delivery_threshold: get_amount(
                &lookup,
                "PINK_PLATE_FREE_DELIVERY_THRESHOLD",
                defaults.pricing.free_delivery_threshold,
            )?,
            flat_delivery_fee: get_amount(
                &lookup,
                "PINK_PLATE_DELIVERY_FEE",
                defaults.pricing.flat_delivery_fee,
            )?,
            tax_rate: get_amount(&lookup, "PINK_PLATE_TAX_RATE", defaults.pricing.tax_rate)?,
        };
        let currency = match lookup("PINK_PLATE_CURRENCY") {
            Some(raw) => CurrencyCode::from_str(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("PINK_PLATE_CURRENCY".to_string(), e.to_string())
            })?,
            None => defaults.currency,
        };

        Ok(Self {
            data_dir,
            pricing,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a non-negative decimal variable, falling back to `default` when unset.
fn get_amount(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".pink-plate"));
        assert_eq!(config.pricing, PricingConfig::default());
        assert_eq!(config.currency, CurrencyCode::PKR);
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("PINK_PLATE_DATA_DIR", "/var/lib/pink-plate"),
            ("PINK_PLATE_FREE_DELIVERY_THRESHOLD", "1000"),
            ("PINK_PLATE_DELIVERY_FEE", "29.5"),
            ("PINK_PLATE_TAX_RATE", " 0.05 "),
            ("PINK_PLATE_CURRENCY", "inr"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/pink-plate"));
        assert_eq!(config.pricing.free_delivery_threshold, Decimal::new(1000, 0));
        assert_eq!(config.pricing.flat_delivery_fee, Decimal::new(295, 1));
        assert_eq!(config.pricing.tax_rate, Decimal::new(5, 2));
        assert_eq!(config.currency, CurrencyCode::INR);
    }

    #[test]
    fn test_invalid_amount() {
        let err =
            StorefrontConfig::from_lookup(lookup(&[("PINK_PLATE_TAX_RATE", "eighteen")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PINK_PLATE_TAX_RATE"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = StorefrontConfig::from_lookup(lookup(&[("PINK_PLATE_DELIVERY_FEE", "-1")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_threshold_allowed() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("PINK_PLATE_FREE_DELIVERY_THRESHOLD", "0")]))
                .unwrap();
        assert!(config.pricing.free_delivery_threshold.is_zero());
    }

    #[test]
    fn test_invalid_currency() {
        let result = StorefrontConfig::from_lookup(lookup(&[("PINK_PLATE_CURRENCY", "DOGE")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
