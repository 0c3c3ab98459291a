//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait: a string-keyed store of
//! string values, the same shape as browser local storage. The catalog keeps
//! exactly one key in it (the watchlist) but the trait stays generic so that
//! the favorites repository never knows which backend it is writing to.

use crate::domain::error::Result;

/// Abstraction over persistent key/value backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local map, for tests
///   and ephemeral sessions
///
/// # Examples
///
/// ```
/// use cinemagic::storage::{KeyValueStore, MemoryStorage};
///
/// let mut storage = MemoryStorage::default();
/// storage.set_item("watchlist", "[\"m1\"]")?;
/// assert_eq!(storage.get_item("watchlist")?.as_deref(), Some("[\"m1\"]"));
/// # Ok::<(), cinemagic::CinemagicError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted. Implementations
    /// keep the new value in memory even when persisting fails.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

