//! Application layer: catalog state, events, and actions.
//!
//! This module holds the catalog's logic-bearing core. It sits between the
//! controller runtime (which owns timers, the worker and storage) and the
//! domain types, and it performs no I/O of its own.
//!
//! # Architecture
//!
//! ```text
//! Commands → Events → handle_event → State Mutations → Actions → Side Effects
//!                          ↑                                  ↓
//!                          └──── Timer / Worker Responses ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Catalog view mode
//! - [`state`]: Catalog state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use cinemagic::app::{handle_event, Action, CatalogState, Event};
//! use cinemagic::domain::Favorites;
//!
//! let mut state = CatalogState::new(Favorites::default(), 12, 6);
//! let (_, actions) = handle_event(&mut state, Event::Start);
//! assert!(matches!(actions[..], [Action::PostToWorker(_)]));
//! assert!(state.loading);
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, OFFLINE_MESSAGE};
pub use modes::ViewMode;
pub use state::CatalogState;
