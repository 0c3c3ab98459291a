//! Async runtime glue: timers, worker tasks and persistence.

pub mod controller;

pub use controller::{CatalogController, ControllerSettings};
