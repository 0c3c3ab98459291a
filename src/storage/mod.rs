//! Storage layer for the persisted watchlist.
//!
//! The watchlist is the only state that outlives a session. It is written as a
//! JSON array of movie ids under one key of a key/value store.
//!
//! # Modules
//!
//! - `backend`: Key/value trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: In-memory implementation
//! - `favorites`: Watchlist encoding on top of any backend

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use favorites::{FavoritesRepository, DEFAULT_FAVORITES_KEY};
pub use json::JsonStorage;
pub use memory::MemoryStorage;
