//! CineMagic: a terminal movie discovery client.
//!
//! CineMagic browses a movie catalog supplied by a generative-AI provider:
//! - Debounced free-text search and a genre filter
//! - Infinite paging by requesting further batches for the same filters
//! - A watchlist persisted locally as a JSON array of movie ids
//! - A detail pane with recommendations for similar movies

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Commands, rendering loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Controller runtime (runtime/)                      │  ← Timers, worker tasks,
//! │                                                     │    persistence
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Catalog state machine
//! │  - Event handling, stale-response filtering         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON store  │   │ - Tickets     │
//! │ - Theming     │   │ - Watchlist   │   │ - Provider    │
//! │ - Commands    │   │ - Backend API │   │   calls       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//!                                         ┌───────────────┐
//!                                         │ Provider      │
//!                                         │ (provider/)   │
//!                                         │ - Gemini REST │
//!                                         └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Catalog state machine with event/action model
//! - [`domain`]: Movie, genre, watchlist and error types
//! - [`infrastructure`]: Platform paths
//! - [`provider`]: Catalog provider trait and Gemini client
//! - [`runtime`]: Controller owning timers, worker tasks and storage
//! - [`storage`]: Key/value persistence and the watchlist repository
//! - [`worker`]: Fetch worker protocol and execution
//! - [`ui`]: Terminal rendering, themes and command parsing
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! `~/.config/cinemagic/config.toml` (or `--config <path>`):
//!
//! ```toml
//! model = "gemini-3-flash-preview"
//! batch_size = 12
//! debounce_ms = 600
//! theme = "catppuccin-latte"
//! trace_level = "debug"
//! ```
//!
//! The API key is read from `GEMINI_API_KEY` (or `API_KEY`) and overrides any
//! `api_key` in the file.
//!
//! # Example
//!
//! ```rust,no_run
//! use cinemagic::{initialize, Config};
//!
//! # async fn run() -> cinemagic::Result<()> {
//! let mut config = Config::default();
//! config.apply_env();
//!
//! let mut controller = initialize(&config)?;
//! controller.start();
//! controller.set_search_query("heist");
//! while controller.state().loading || controller.state().search_input != controller.state().search_query {
//!     controller.process_next().await;
//! }
//! println!("{} movies", controller.visible_movies().len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod provider;
pub mod runtime;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, CatalogState, Event, ViewMode};
pub use domain::{CinemagicError, Favorites, Genre, Movie, Result};
pub use runtime::{CatalogController, ControllerSettings};
pub use ui::Theme;

use provider::{GeminiProvider, GeminiSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::{FavoritesRepository, JsonStorage};

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Application configuration.
///
/// Every field has a default, so a partial TOML file or an empty map is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider API key. Without one every fetch fails with the offline
    /// message.
    pub api_key: Option<String>,

    /// Provider model name.
    pub model: String,

    /// Provider REST root.
    pub api_base_url: String,

    /// Sampling temperature for catalog batches.
    pub temperature: f32,

    /// Movies per batch. Default: 12
    pub batch_size: usize,

    /// Recommendations per detail pane. Default: 6
    pub recommendation_count: usize,

    /// Search debounce window in milliseconds. Default: 600
    pub debounce_ms: u64,

    /// Per-request timeout in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Directory for the watchlist store and trace files.
    ///
    /// Defaults to the platform data directory; `~` is expanded.
    pub data_dir: Option<String>,

    /// Key the watchlist is stored under. Default: `"watchlist"`
    pub storage_key: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme: String,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: provider::gemini::DEFAULT_MODEL.to_string(),
            api_base_url: provider::gemini::DEFAULT_API_BASE_URL.to_string(),
            temperature: 0.7,
            batch_size: 12,
            recommendation_count: 6,
            debounce_ms: 600,
            request_timeout_secs: 30,
            data_dir: None,
            storage_key: storage::DEFAULT_FAVORITES_KEY.to_string(),
            theme: "catppuccin-mocha".to_string(),
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CinemagicError::Config`] on invalid TOML or mistyped values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CinemagicError::Config(e.to_string()))
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// explicit `path` is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (infrastructure::default_config_file(), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CinemagicError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Builds a configuration from a flat string map.
    ///
    /// Unknown keys are ignored; values that fail to parse fall back to their
    /// defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinemagic::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("batch_size".to_string(), "24".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.batch_size, 24);
    /// assert_eq!(config.debounce_ms, 600);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        fn parsed<T: std::str::FromStr>(map: &BTreeMap<String, String>, key: &str, default: T) -> T {
            map.get(key)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(default)
        }
        fn text(map: &BTreeMap<String, String>, key: &str) -> Option<String> {
            map.get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        }

        let defaults = Self::default();
        Self {
            api_key: text(map, "api_key"),
            model: text(map, "model").unwrap_or(defaults.model),
            api_base_url: text(map, "api_base_url").unwrap_or(defaults.api_base_url),
            temperature: parsed(map, "temperature", defaults.temperature),
            batch_size: parsed(map, "batch_size", defaults.batch_size),
            recommendation_count: parsed(map, "recommendation_count", defaults.recommendation_count),
            debounce_ms: parsed(map, "debounce_ms", defaults.debounce_ms),
            request_timeout_secs: parsed(map, "request_timeout_secs", defaults.request_timeout_secs),
            data_dir: text(map, "data_dir"),
            storage_key: text(map, "storage_key").unwrap_or(defaults.storage_key),
            theme: text(map, "theme").unwrap_or(defaults.theme),
            theme_file: text(map, "theme_file"),
            trace_level: text(map, "trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Overrides the API key from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Overrides the API key using `lookup` for environment access.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
        {
            self.api_key = Some(key.trim().to_string());
        }
    }

    /// Checks values that have no sensible fallback.
    ///
    /// # Errors
    ///
    /// Returns [`CinemagicError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(CinemagicError::Config("batch_size must be positive".to_string()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(CinemagicError::Config("storage_key must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CinemagicError::Config(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::get_data_dir, infrastructure::expand_tilde)
    }

    #[must_use]
    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base_url: self.api_base_url.clone(),
            temperature: self.temperature,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    #[must_use]
    pub const fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            batch_size: self.batch_size,
            recommendation_count: self.recommendation_count,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }

    /// Loads the configured theme, falling back to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        Theme::from_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme, using default");
            Theme::default()
        })
    }
}

/// Builds a controller backed by Gemini and the JSON store in the data dir.
///
/// The watchlist is restored immediately; call
/// [`CatalogController::start`] from within a tokio runtime to issue the
/// first fetch.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the data directory
/// cannot be created, or the HTTP client cannot be built.
pub fn initialize(config: &Config) -> Result<CatalogController<GeminiProvider, JsonStorage>> {
    tracing::debug!("initializing cinemagic");
    config.validate()?;

    if config.api_key.is_none() {
        tracing::warn!("no API key configured; catalog requests will fail");
    }

    let store = JsonStorage::open(infrastructure::storage_file(&config.data_dir()))?;
    let favorites = FavoritesRepository::new(store, config.storage_key.clone());
    let provider = GeminiProvider::new(config.gemini_settings())?;

    Ok(CatalogController::new(provider, favorites, config.controller_settings()))
}
