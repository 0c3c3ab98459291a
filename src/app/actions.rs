//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never performs I/O itself. It returns
//! a list of [`Action`]s that the controller runtime executes in order:
//! arming timers, spawning worker calls and writing the watchlist.
//!
//! # Example
//!
//! ```rust
//! use cinemagic::app::Action;
//!
//! let actions = vec![
//!     Action::ScheduleDebounce { generation: 1 },
//!     Action::PersistFavorites { ids: vec!["m1".to_string()] },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands executed by the controller runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Re-arms the search debounce timer.
    ///
    /// Any previously armed timer is cancelled. When this one elapses the
    /// runtime feeds `Event::DebounceElapsed { generation }` back in.
    ScheduleDebounce {
        /// Generation this timer was armed for.
        generation: u64,
    },

    /// Hands a request to the fetch worker.
    ///
    /// The worker's answer comes back as `Event::WorkerResponse`.
    PostToWorker(WorkerMessage),

    /// Writes the complete watchlist to storage.
    PersistFavorites {
        /// Favorite ids in insertion order.
        ids: Vec<String>,
    },
}
