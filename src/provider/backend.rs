//! Provider abstraction for catalog data.
//!
//! The catalog never talks to an HTTP API directly. It hands a
//! [`MovieQuery`] to a [`MovieProvider`] and gets movies or a
//! [`ProviderError`] back, which keeps the controller testable against fake
//! providers.

use crate::domain::{Genre, Movie};
use async_trait::async_trait;

/// Failure modes of a provider call.
///
/// The controller does not distinguish between them; every variant ends up as
/// the same offline message. They are kept apart for logging.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("provider blocked the request: {0}")]
    Blocked(String),

    #[error("malformed provider answer: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Request parameters for one catalog batch.
///
/// There is no page or continuation token: every call asks for "another batch
/// matching these filters".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    /// Free-text search; `None` when the effective query is empty.
    pub search: Option<String>,
    /// Genre filter; `None` for [`Genre::All`].
    pub genre: Option<Genre>,
    /// Number of movies to ask for.
    pub limit: usize,
}

impl MovieQuery {
    /// Builds a query from raw controller state, dropping empty filters.
    ///
    /// ```
    /// use cinemagic::provider::MovieQuery;
    /// use cinemagic::Genre;
    ///
    /// let query = MovieQuery::new("  ", Genre::All, 12);
    /// assert_eq!(query.search, None);
    /// assert_eq!(query.genre, None);
    /// ```
    #[must_use]
    pub fn new(search: &str, genre: Genre, limit: usize) -> Self {
        let search = search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            genre: genre.as_filter(),
            limit,
        }
    }
}

/// Source of movie data.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fetches one batch of movies matching `query`.
    ///
    /// Zero movies is a valid answer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, provider failure or an answer
    /// that does not decode into movies.
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<Movie>, ProviderError>;

    /// Fetches up to `count` movies similar to `title`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MovieProvider::fetch_movies`].
    async fn recommend(&self, title: &str, count: usize) -> Result<Vec<Movie>, ProviderError>;
}

