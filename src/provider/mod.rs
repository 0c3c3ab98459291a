//! Catalog data providers.
//!
//! # Modules
//!
//! - `backend`: [`MovieProvider`] trait, request and error types
//! - `prompt`: Prompt text and JSON response schema
//! - `gemini`: Gemini REST implementation

pub mod backend;
pub mod gemini;
pub mod prompt;

pub use backend::{MovieProvider, MovieQuery, ProviderError};
pub use gemini::{GeminiProvider, GeminiSettings};
