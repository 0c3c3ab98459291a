//! Watchlist persistence on top of a [`KeyValueStore`].

use crate::domain::error::Result;
use crate::domain::Favorites;
use crate::storage::backend::KeyValueStore;

/// Key the watchlist is stored under unless configured otherwise.
pub const DEFAULT_FAVORITES_KEY: &str = "watchlist";

/// Reads and writes the favorites set as a JSON array under a single key.
#[derive(Debug)]
pub struct FavoritesRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> FavoritesRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Restores the persisted favorites.
    ///
    /// A missing key, an unreadable backend or a value that is not a JSON
    /// array of strings all yield an empty set; nothing is surfaced to the
    /// caller.
    #[must_use]
    pub fn restore(&self) -> Favorites {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no persisted favorites");
                return Favorites::default();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read favorites");
                return Favorites::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                let favorites = Favorites::from_ids(ids);
                tracing::debug!(count = favorites.len(), "favorites restored");
                favorites
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding corrupt favorites");
                Favorites::default()
            }
        }
    }

    /// Persists the full favorites set.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn persist(&mut self, favorites: &Favorites) -> Result<()> {
        let encoded = serde_json::to_string(favorites)?;
        self.store.set_item(&self.key, &encoded)
    }
}
