//! The catalog controller: event loop glue around [`handle_event`].
//!
//! [`CatalogController`] owns the catalog state, the fetch worker, the
//! watchlist repository and an event channel. Public operations translate to
//! [`Event`]s; the resulting [`Action`]s are executed here:
//!
//! - `ScheduleDebounce` aborts the pending timer task and spawns a new one
//! - `PostToWorker` spawns a task that runs the worker and sends its response
//!   back through the channel
//! - `PersistFavorites` writes the watchlist synchronously
//!
//! Timer and worker results re-enter through [`CatalogController::process_next`],
//! which the front end awaits alongside user input.
//!
//! All spawning uses [`tokio::spawn`], so operations must be called from
//! within a tokio runtime.

use crate::app::{handle_event, Action, CatalogState, Event};
use crate::domain::{Favorites, Genre, Movie};
use crate::provider::MovieProvider;
use crate::storage::{FavoritesRepository, KeyValueStore};
use crate::worker::{MovieWorker, WorkerMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Tunables for a controller session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Movies requested per batch.
    pub batch_size: usize,
    /// Movies requested for the detail pane.
    pub recommendation_count: usize,
    /// Quiet period before typed search text takes effect.
    pub debounce: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            batch_size: 12,
            recommendation_count: 6,
            debounce: Duration::from_millis(600),
        }
    }
}

/// Owner of one catalog session.
pub struct CatalogController<P, S> {
    state: CatalogState,
    worker: Arc<MovieWorker<P>>,
    favorites: FavoritesRepository<S>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    debounce: Duration,
    debounce_task: Option<JoinHandle<()>>,
}

impl<P, S> CatalogController<P, S>
where
    P: MovieProvider + 'static,
    S: KeyValueStore,
{
    /// Creates a controller and restores the watchlist from `favorites`.
    ///
    /// No fetch is issued until [`start`](Self::start).
    pub fn new(provider: P, favorites: FavoritesRepository<S>, settings: ControllerSettings) -> Self {
        let restored = favorites.restore();
        tracing::debug!(favorites = restored.len(), ?settings, "catalog controller created");

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: CatalogState::new(restored, settings.batch_size, settings.recommendation_count),
            worker: Arc::new(MovieWorker::new(provider)),
            favorites,
            events_tx,
            events_rx,
            debounce: settings.debounce,
            debounce_task: None,
        }
    }

    /// Issues the first fetch of the session.
    pub fn start(&mut self) -> bool {
        self.dispatch(Event::Start)
    }

    /// Updates the typed search text; the fetch follows after the debounce
    /// window if no further text arrives.
    pub fn set_search_query(&mut self, text: impl Into<String>) -> bool {
        self.dispatch(Event::SearchInput(text.into()))
    }

    pub fn set_genre(&mut self, genre: Genre) -> bool {
        self.dispatch(Event::SelectGenre(genre))
    }

    /// Requests the next batch. Ignored while loading, when exhausted, or in
    /// the watchlist view.
    pub fn load_next_page(&mut self) -> bool {
        self.dispatch(Event::LoadNextPage)
    }

    pub fn toggle_favorite(&mut self, movie_id: impl Into<String>) -> bool {
        self.dispatch(Event::ToggleFavorite(movie_id.into()))
    }

    pub fn toggle_favorites_view(&mut self) -> bool {
        self.dispatch(Event::ToggleFavoritesView)
    }

    pub fn retry(&mut self) -> bool {
        self.dispatch(Event::Retry)
    }

    pub fn open_movie(&mut self, movie_id: impl Into<String>) -> bool {
        self.dispatch(Event::OpenDetails(movie_id.into()))
    }

    pub fn close_movie(&mut self) -> bool {
        self.dispatch(Event::CloseDetails)
    }

    /// Feeds one event through the handler and executes its actions.
    ///
    /// Returns whether the view should re-render.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let (should_render, actions) = handle_event(&mut self.state, event);
        tracing::trace!(action_count = actions.len(), should_render, "event handled");

        for action in actions {
            self.execute_action(action);
        }
        should_render
    }

    /// Waits for the next timer or worker event and dispatches it.
    ///
    /// Cancel safe: dropping the future before it completes loses no event.
    pub async fn process_next(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    /// Dispatches every event that is already queued without waiting.
    pub fn process_pending(&mut self) -> bool {
        let mut should_render = false;
        while let Ok(event) = self.events_rx.try_recv() {
            should_render |= self.dispatch(event);
        }
        should_render
    }

    #[must_use]
    pub const fn state(&self) -> &CatalogState {
        &self.state
    }

    #[must_use]
    pub fn visible_movies(&self) -> Vec<&Movie> {
        self.state.visible_movies()
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.state.favorites
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        self.worker.provider()
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::ScheduleDebounce { generation } => self.schedule_debounce(generation),
            Action::PostToWorker(message) => self.post_to_worker(message),
            Action::PersistFavorites { .. } => {
                if let Err(e) = self.favorites.persist(&self.state.favorites) {
                    tracing::warn!(error = %e, "failed to persist watchlist");
                }
            }
        }
    }

    fn schedule_debounce(&mut self, generation: u64) {
        if let Some(pending) = self.debounce_task.take() {
            pending.abort();
        }

        let events_tx = self.events_tx.clone();
        let delay = self.debounce;
        self.debounce_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events_tx.send(Event::DebounceElapsed { generation });
        }));
    }

    fn post_to_worker(&self, message: WorkerMessage) {
        let worker = Arc::clone(&self.worker);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            if events_tx.send(Event::WorkerResponse(response)).is_err() {
                tracing::debug!("controller dropped before worker response arrived");
            }
        });
    }
}

impl<P, S> Drop for CatalogController<P, S> {
    fn drop(&mut self) {
        if let Some(pending) = self.debounce_task.take() {
            pending.abort();
        }
    }
}
