//! Terminal user interface.
//!
//! ```text
//! CatalogState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! Typed command lines are parsed by [`input`] into [`Command`]s.
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (cursor, width, wrapping)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//! - [`input`]: Command line parsing

pub mod components;
pub mod helpers;
pub mod input;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use input::{parse_command, Command, CommandError, Target, HELP_TEXT};
pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    BodyView, DetailsView, DisplayItem, EmptyState, FooterInfo, GridView, HeaderInfo,
    MessageKind, SearchBarInfo, UIViewModel,
};
