//! Unified error type for storefront consumers.
//!
//! Each module returns its own error; front-ends that drive several of them
//! can collect into [`StorefrontError`] with `?`.

use std::path::PathBuf;

use pink_plate_core::ReservationError;
use thiserror::Error;

use crate::cart::CartError;
use crate::config::ConfigError;
use crate::favorites::FavoritesError;
use crate::offers::OfferError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Favorites update failed.
    #[error("Favorites error: {0}")]
    Favorites(#[from] FavoritesError),

    /// Offer browsing failed.
    #[error("Offer error: {0}")]
    Offer(#[from] OfferError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Reservation details failed validation.
    #[error("Reservation error: {0}")]
    Reservation(#[from] ReservationError),

    /// An input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input could not be decoded.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StorefrontError {
    /// Whether the error was caused by what the customer entered, as opposed
    /// to an environment or storage failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Cart(CartError::Validation(_) | CartError::Overflow(_))
                | Self::Offer(_)
                | Self::Reservation(_)
                | Self::InvalidInput(_)
        )
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
