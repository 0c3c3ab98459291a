//! Error types for CineMagic.
//!
//! This module defines the centralized error type [`CinemagicError`] and a type
//! alias [`Result`] used throughout the crate. Provider failures have their own
//! [`ProviderError`](crate::provider::ProviderError) because the controller
//! never propagates them; they are folded into the catalog's error state.

use thiserror::Error;

/// The main error type for CineMagic operations.
///
/// Consolidates the failure conditions that can escape a component boundary:
/// storage, configuration, provider setup and I/O. Variants wrapping external errors use
/// `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use cinemagic::CinemagicError;
///
/// fn validate_config() -> Result<(), CinemagicError> {
///     Err(CinemagicError::Config("batch_size must be positive".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum CinemagicError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key/value store fails. The
    /// string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The catalog provider could not be set up.
    #[error("Provider error: {0}")]
    Provider(#[from] crate::provider::ProviderError),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for CineMagic operations.
pub type Result<T> = std::result::Result<T, CinemagicError>;
