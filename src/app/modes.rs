//! View mode state for the catalog.
//!
//! The catalog is shown either in full or restricted to the watchlist. While
//! the watchlist view is active pagination is suspended.
//!
//! # Example
//!
//! ```rust
//! use cinemagic::app::ViewMode;
//!
//! let mode = ViewMode::Catalog.toggled();
//! assert_eq!(mode, ViewMode::FavoritesOnly);
//! ```

/// Which subset of the loaded movies is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every loaded movie, in load order.
    ///
    /// Header displays the search or genre title. Load-more is available.
    #[default]
    Catalog,

    /// Loaded movies whose id is on the watchlist, in load order.
    ///
    /// Header displays "Your Cinematic Watchlist". Load-more is suspended.
    FavoritesOnly,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Catalog => Self::FavoritesOnly,
            Self::FavoritesOnly => Self::Catalog,
        }
    }
}
