//! Favorite dishes, persisted under [`FAVORITES_KEY`].

use pink_plate_core::ProductId;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::storage::{self, FAVORITES_KEY, KeyValueStore, StorageError};

/// Errors returned when updating favorites.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("failed to persist favorites: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The set of products a customer has hearted, in the order they were added.
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    ids: Vec<ProductId>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Rehydrate from `store`. Absent or malformed values load empty.
    pub fn load(store: S) -> Self {
        let ids = storage::read_or_absent(&store, FAVORITES_KEY)
            .map_or_else(Vec::new, |raw| {
                serde_json::from_str::<Vec<ProductId>>(&raw).unwrap_or_else(|e| {
                    warn!(error = %e, "Discarding malformed favorites");
                    Vec::new()
                })
            });
        let mut favorites = Self {
            store,
            ids: Vec::with_capacity(ids.len()),
        };
        for id in ids {
            if !favorites.ids.contains(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    /// Flip `id` in or out of the set. Returns `true` if it is now a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the set could not be persisted; the set is then
    /// unchanged.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, id: ProductId) -> Result<bool, FavoritesError> {
        let mut next = self.ids.clone();
        let now_favorite = if let Some(pos) = next.iter().position(|fav| *fav == id) {
            next.remove(pos);
            false
        } else {
            next.push(id);
            true
        };

        let raw = serde_json::to_string(&next)?;
        self.store.set(FAVORITES_KEY, &raw)?;
        self.ids = next;
        debug!(now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }

    /// Whether `id` is a favorite.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Favorite ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Consume, returning the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = Favorites::load(MemoryStore::new());
        assert!(favorites.toggle(ProductId::new(3)).unwrap());
        assert!(favorites.contains(ProductId::new(3)));
        assert!(!favorites.toggle(ProductId::new(3)).unwrap());
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let mut favorites = Favorites::load(MemoryStore::new());
        for id in [5, 1, 9] {
            favorites.toggle(ProductId::new(id)).unwrap();
        }
        favorites.toggle(ProductId::new(1)).unwrap();
        assert_eq!(favorites.ids(), &[ProductId::new(5), ProductId::new(9)]);
    }

    #[test]
    fn test_persisted_as_id_array() {
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.toggle(ProductId::new(2)).unwrap();
        favorites.toggle(ProductId::new(7)).unwrap();
        let store = favorites.into_store();
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[2,7]"));

        let reloaded = Favorites::load(store);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains(ProductId::new(7)));
    }

    #[test]
    fn test_malformed_loads_empty() {
        let favorites = Favorites::load(MemoryStore::with_value(FAVORITES_KEY, "{oops"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_duplicate_ids_collapse_on_load() {
        let favorites = Favorites::load(MemoryStore::with_value(FAVORITES_KEY, "[4,4,6]"));
        assert_eq!(favorites.ids(), &[ProductId::new(4), ProductId::new(6)]);
    }
}
