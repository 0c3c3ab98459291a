//! Domain layer for CineMagic.
//!
//! Core value types of the catalog, independent of the provider, storage and
//! terminal concerns that surround them.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie record as supplied by the provider
//! - [`genre`]: Genre filter enumeration
//! - [`favorites`]: The persisted watchlist set

pub mod error;
pub mod favorites;
pub mod genre;
pub mod movie;

pub use error::{CinemagicError, Result};
pub use favorites::Favorites;
pub use genre::{Genre, UnknownGenre};
pub use movie::{Movie, FALLBACK_BACKDROP, FALLBACK_POSTER};
