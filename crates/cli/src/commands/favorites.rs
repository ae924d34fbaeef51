//! Favorites subcommands.

use pink_plate_core::ProductId;
use pink_plate_storefront::config::StorefrontConfig;
use pink_plate_storefront::Result;
use pink_plate_storefront::favorites::Favorites;
use pink_plate_storefront::storage::FileStore;
use tracing::info;

/// Add or remove a favorite.
///
/// # Errors
///
/// Returns an error if the favorites list cannot be written.
pub fn toggle(config: &StorefrontConfig, id: ProductId) -> Result<()> {
    let mut favorites = Favorites::load(FileStore::new(&config.data_dir));
    let added = favorites.toggle(id)?;
    info!(%id, added, "Favorite toggled");

    if added {
        println!("Added {id} to favorites");
    } else {
        println!("Removed {id} from favorites");
    }
    Ok(())
}

/// Print favorite ids in the order they were added.
pub fn list(config: &StorefrontConfig) {
    let favorites = Favorites::load(FileStore::new(&config.data_dir));
    if favorites.is_empty() {
        println!("No favorites yet");
        return;
    }
    for id in favorites.ids() {
        println!("{id}");
    }
}
