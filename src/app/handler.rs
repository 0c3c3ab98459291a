//! Event handling and state transition logic.
//!
//! [`handle_event`] is the catalog's only write path. It pattern-matches an
//! [`Event`], mutates [`CatalogState`], and returns whether a re-render is
//! needed together with the [`Action`]s the runtime must execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start`
//! - **Filters**: `SearchInput`, `DebounceElapsed`, `SelectGenre`
//! - **Pagination**: `LoadNextPage`, `Retry`
//! - **Watchlist**: `ToggleFavorite`, `ToggleFavoritesView`
//! - **Details**: `OpenDetails`, `CloseDetails`
//! - **Worker**: `WorkerResponse` with typed response variants
//!
//! # Stale responses
//!
//! Every catalog fetch is issued with a fresh ticket and the state remembers
//! only the latest one. A response carrying any other ticket was superseded by
//! a later search or genre change and is dropped without touching state.

use crate::app::{Action, CatalogState};
use crate::domain::Genre;
use crate::worker::{FetchMode, WorkerMessage, WorkerResponse};

/// Error text shown for every failed catalog fetch.
pub const OFFLINE_MESSAGE: &str =
    "The cinematic universe is currently offline. Please try again in a few moments.";

/// Events triggered by user commands, timers, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Issues the first fetch of the session.
    Start,

    /// The search text changed. Re-arms the debounce timer.
    SearchInput(String),

    /// A debounce timer elapsed.
    DebounceElapsed {
        /// Generation the timer was armed for; stale generations are ignored.
        generation: u64,
    },

    /// Replaces the genre filter and leaves the watchlist view.
    SelectGenre(Genre),

    /// Requests the next batch for infinite scroll.
    LoadNextPage,

    /// Flips watchlist membership of a movie id.
    ToggleFavorite(String),

    /// Switches between the full catalog and the watchlist view.
    ToggleFavoritesView,

    /// Re-issues the fetch for the current query, genre and page.
    Retry,

    /// Opens the detail pane for a movie id and requests recommendations.
    OpenDetails(String),

    /// Closes the detail pane.
    CloseDetails,

    /// Wraps a response from the fetch worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name used in spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SearchInput(_) => "search_input",
            Self::DebounceElapsed { .. } => "debounce_elapsed",
            Self::SelectGenre(_) => "select_genre",
            Self::LoadNextPage => "load_next_page",
            Self::ToggleFavorite(_) => "toggle_favorite",
            Self::ToggleFavoritesView => "toggle_favorites_view",
            Self::Retry => "retry",
            Self::OpenDetails(_) => "open_details",
            Self::CloseDetails => "close_details",
            Self::WorkerResponse(_) => "worker_response",
        }
    }
}

/// Processes an event, mutates catalog state, and returns actions to execute.
///
/// The boolean is `true` when the visible state changed and a re-render is
/// due. Actions are returned in execution order.
///
/// # Example
///
/// ```rust
/// use cinemagic::app::{handle_event, Action, CatalogState, Event};
/// use cinemagic::domain::Favorites;
///
/// let mut state = CatalogState::new(Favorites::default(), 12, 6);
/// let (render, actions) = handle_event(&mut state, Event::ToggleFavorite("m1".into()));
/// assert!(render);
/// assert_eq!(actions, vec![Action::PersistFavorites { ids: vec!["m1".into()] }]);
/// ```
pub fn handle_event(state: &mut CatalogState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::Start => {
            state.page = 1;
            (true, vec![start_fetch(state, FetchMode::Replace)])
        }
        Event::SearchInput(text) => {
            state.search_input = text;
            state.debounce_generation += 1;
            tracing::trace!(input = %state.search_input, generation = state.debounce_generation, "search input updated");
            (
                true,
                vec![Action::ScheduleDebounce {
                    generation: state.debounce_generation,
                }],
            )
        }
        Event::DebounceElapsed { generation } => {
            if generation != state.debounce_generation {
                tracing::trace!(generation, current = state.debounce_generation, "ignoring superseded debounce");
                return (false, vec![]);
            }
            if state.search_input == state.search_query {
                tracing::debug!("search settled on current query, nothing to fetch");
                return (true, vec![]);
            }

            state.search_query.clone_from(&state.search_input);
            state.page = 1;
            tracing::debug!(query = %state.search_query, "search query settled");
            (true, vec![start_fetch(state, FetchMode::Replace)])
        }
        Event::SelectGenre(genre) => {
            state.view_mode = super::ViewMode::Catalog;
            if genre == state.selected_genre {
                return (true, vec![]);
            }

            state.selected_genre = genre;
            state.page = 1;
            tracing::debug!(genre = %genre, "genre selected");
            (true, vec![start_fetch(state, FetchMode::Replace)])
        }
        Event::LoadNextPage => {
            if !state.can_load_more() {
                tracing::debug!(
                    loading = state.loading,
                    has_more = state.has_more,
                    view_mode = ?state.view_mode,
                    "load more ignored"
                );
                return (false, vec![]);
            }

            state.page += 1;
            (true, vec![start_fetch(state, FetchMode::Append)])
        }
        Event::ToggleFavorite(id) => {
            let added = state.favorites.toggle(&id);
            tracing::debug!(movie_id = %id, added, total = state.favorites.len(), "watchlist toggled");
            (
                true,
                vec![Action::PersistFavorites {
                    ids: state.favorites.ids().to_vec(),
                }],
            )
        }
        Event::ToggleFavoritesView => {
            state.view_mode = state.view_mode.toggled();
            (true, vec![])
        }
        Event::Retry => {
            if state.loading {
                tracing::debug!("retry ignored while a fetch is in flight");
                return (false, vec![]);
            }

            let mode = if state.page > 1 {
                FetchMode::Append
            } else {
                FetchMode::Replace
            };
            (true, vec![start_fetch(state, mode)])
        }
        Event::OpenDetails(id) => {
            let Some(movie) = state.find_movie(&id).cloned() else {
                tracing::debug!(movie_id = %id, "no loaded movie with this id");
                return (false, vec![]);
            };

            let message = WorkerMessage::fetch_recommendations(
                state.issue_recommendation_request(),
                movie.id.clone(),
                movie.title.clone(),
                state.recommendation_count,
            );
            state.selected_movie = Some(movie);
            state.recommendations.clear();
            state.recommendations_loading = true;
            (true, vec![Action::PostToWorker(message)])
        }
        Event::CloseDetails => {
            if state.selected_movie.take().is_none() {
                return (false, vec![]);
            }
            state.recommendations.clear();
            state.recommendations_loading = false;
            (true, vec![])
        }
        Event::WorkerResponse(response) => apply_worker_response(state, response),
    }
}

fn start_fetch(state: &mut CatalogState, mode: FetchMode) -> Action {
    let ticket = state.issue_ticket(mode);
    tracing::debug!(
        ticket = ticket.id,
        query = %ticket.query,
        genre = %ticket.genre,
        page = ticket.page,
        mode = ?ticket.mode,
        "fetch issued"
    );
    Action::PostToWorker(WorkerMessage::fetch_movies(ticket))
}

fn apply_worker_response(state: &mut CatalogState, response: WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::MoviesFetched { ticket, movies } => {
            if !state.is_current(&ticket) {
                tracing::debug!(ticket = ticket.id, "discarding stale batch");
                return (false, vec![]);
            }

            state.in_flight = None;
            state.loading = false;
            state.error = None;
            state.has_more = !movies.is_empty();

            tracing::debug!(ticket = ticket.id, count = movies.len(), mode = ?ticket.mode, "batch applied");
            match ticket.mode {
                FetchMode::Replace => state.movies = movies,
                FetchMode::Append => state.movies.extend(movies),
            }
            (true, vec![])
        }
        WorkerResponse::FetchFailed { ticket, message } => {
            if !state.is_current(&ticket) {
                tracing::debug!(ticket = ticket.id, "discarding stale failure");
                return (false, vec![]);
            }

            tracing::warn!(ticket = ticket.id, error = %message, "catalog fetch failed");
            state.in_flight = None;
            state.loading = false;
            state.error = Some(OFFLINE_MESSAGE.to_string());
            (true, vec![])
        }
        WorkerResponse::RecommendationsFetched {
            request,
            movie_id,
            movies,
        } => {
            let is_open = state
                .selected_movie
                .as_ref()
                .is_some_and(|movie| movie.id == movie_id);
            if !is_open || request != state.recommendation_request {
                tracing::debug!(movie_id = %movie_id, request, "discarding stale recommendations");
                return (false, vec![]);
            }

            state.recommendations = movies;
            state.recommendations_loading = false;
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewMode;
    use crate::domain::movie::sample;
    use crate::domain::{Favorites, Movie};
    use crate::worker::FetchTicket;

    fn new_state() -> CatalogState {
        CatalogState::new(Favorites::default(), 12, 6)
    }

    fn batch(prefix: &str, n: usize) -> Vec<Movie> {
        (0..n).map(|i| sample(&format!("{prefix}{i}"))).collect()
    }

    fn issued_ticket(actions: &[Action]) -> FetchTicket {
        match actions {
            [Action::PostToWorker(WorkerMessage::FetchMovies { ticket, .. })] => ticket.clone(),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn recommendation_request(actions: &[Action]) -> u64 {
        match actions {
            [Action::PostToWorker(WorkerMessage::FetchRecommendations { request, .. })] => *request,
            other => panic!("expected a recommendations request, got {other:?}"),
        }
    }

    fn resolve(state: &mut CatalogState, ticket: FetchTicket, movies: Vec<Movie>) -> bool {
        handle_event(state, Event::WorkerResponse(WorkerResponse::MoviesFetched { ticket, movies })).0
    }

    fn fail(state: &mut CatalogState, ticket: FetchTicket) -> bool {
        let response = WorkerResponse::FetchFailed {
            ticket,
            message: "HTTP 503".to_string(),
        };
        handle_event(state, Event::WorkerResponse(response)).0
    }

    fn started() -> CatalogState {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, Event::Start);
        resolve(&mut state, issued_ticket(&actions), batch("p1-", 12));
        state
    }

    #[test]
    fn start_fetches_first_page_without_filters() {
        let mut state = new_state();
        let (render, actions) = handle_event(&mut state, Event::Start);
        let ticket = issued_ticket(&actions);

        assert!(render);
        assert!(state.loading);
        assert_eq!(ticket.page, 1);
        assert_eq!(ticket.mode, FetchMode::Replace);
        assert_eq!(ticket.query, "");
        assert_eq!(ticket.genre, Genre::All);
        assert_eq!(ticket.limit, 12);
    }

    #[test]
    fn search_input_only_schedules_debounce() {
        let mut state = started();
        let (_, actions) = handle_event(&mut state, Event::SearchInput("he".into()));
        assert_eq!(actions, vec![Action::ScheduleDebounce { generation: 1 }]);
        let (_, actions) = handle_event(&mut state, Event::SearchInput("heat".into()));
        assert_eq!(actions, vec![Action::ScheduleDebounce { generation: 2 }]);
        assert_eq!(state.search_query, "");
        assert!(!state.loading);
    }

    #[test]
    fn only_latest_debounce_generation_fetches() {
        let mut state = started();
        handle_event(&mut state, Event::SearchInput("he".into()));
        handle_event(&mut state, Event::SearchInput("heat".into()));

        let (render, actions) = handle_event(&mut state, Event::DebounceElapsed { generation: 1 });
        assert!(!render);
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, Event::DebounceElapsed { generation: 2 });
        let ticket = issued_ticket(&actions);
        assert_eq!(ticket.query, "heat");
        assert_eq!(ticket.page, 1);
        assert_eq!(state.search_query, "heat");
    }

    #[test]
    fn settled_text_equal_to_query_does_not_fetch() {
        let mut state = started();
        handle_event(&mut state, Event::SearchInput("x".into()));
        handle_event(&mut state, Event::SearchInput(String::new()));
        let (_, actions) = handle_event(&mut state, Event::DebounceElapsed { generation: 2 });
        assert!(actions.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn new_query_resets_page_and_replaces_on_resolution() {
        let mut state = started();
        let (_, actions) = handle_event(&mut state, Event::LoadNextPage);
        resolve(&mut state, issued_ticket(&actions), batch("p2-", 12));
        assert_eq!(state.page, 2);
        assert_eq!(state.movies.len(), 24);

        handle_event(&mut state, Event::SearchInput("noir".into()));
        let (_, actions) = handle_event(&mut state, Event::DebounceElapsed { generation: 1 });
        assert_eq!(state.page, 1);
        assert_eq!(state.movies.len(), 24, "old list stays until the answer arrives");

        resolve(&mut state, issued_ticket(&actions), batch("noir-", 3));
        assert_eq!(state.movies.len(), 3);
        assert!(state.has_more);
    }

    #[test]
    fn genre_change_clears_favorites_view_and_fetches() {
        let mut state = started();
        state.view_mode = ViewMode::FavoritesOnly;
        state.page = 3;

        let (_, actions) = handle_event(&mut state, Event::SelectGenre(Genre::Horror));
        let ticket = issued_ticket(&actions);
        assert_eq!(state.view_mode, ViewMode::Catalog);
        assert_eq!(ticket.genre, Genre::Horror);
        assert_eq!(ticket.page, 1);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn reselecting_active_genre_only_leaves_favorites_view() {
        let mut state = started();
        state.view_mode = ViewMode::FavoritesOnly;

        let (render, actions) = handle_event(&mut state, Event::SelectGenre(Genre::All));
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.view_mode, ViewMode::Catalog);
    }

    #[test]
    fn toggle_favorite_is_an_involution() {
        let mut state = started();
        let before = state.favorites.clone();

        let (_, actions) = handle_event(&mut state, Event::ToggleFavorite("p1-3".into()));
        assert_eq!(actions, vec![Action::PersistFavorites { ids: vec!["p1-3".into()] }]);
        assert!(state.favorites.contains("p1-3"));

        let (_, actions) = handle_event(&mut state, Event::ToggleFavorite("p1-3".into()));
        assert_eq!(actions, vec![Action::PersistFavorites { ids: vec![] }]);
        assert_eq!(state.favorites, before);
    }

    #[test]
    fn load_next_page_noop_while_loading() {
        let mut state = new_state();
        handle_event(&mut state, Event::Start);
        let (render, actions) = handle_event(&mut state, Event::LoadNextPage);
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn load_next_page_noop_when_exhausted() {
        let mut state = started();
        state.has_more = false;
        let (_, actions) = handle_event(&mut state, Event::LoadNextPage);
        assert!(actions.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn load_next_page_noop_in_favorites_view() {
        let mut state = started();
        handle_event(&mut state, Event::ToggleFavoritesView);
        let (_, actions) = handle_event(&mut state, Event::LoadNextPage);
        assert!(actions.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn twelve_then_zero_pagination() {
        let mut state = started();
        assert_eq!(state.movies.len(), 12);
        assert!(state.has_more);

        let (_, actions) = handle_event(&mut state, Event::LoadNextPage);
        let ticket = issued_ticket(&actions);
        assert_eq!(ticket.page, 2);
        assert_eq!(ticket.mode, FetchMode::Append);
        resolve(&mut state, ticket, vec![]);

        assert_eq!(state.page, 2);
        assert_eq!(state.movies.len(), 12);
        assert!(!state.has_more);

        let (_, actions) = handle_event(&mut state, Event::LoadNextPage);
        assert!(actions.is_empty());
    }

    #[test]
    fn empty_fresh_fetch_clears_movies() {
        let mut state = started();
        handle_event(&mut state, Event::SearchInput("zzzz".into()));
        let (_, actions) = handle_event(&mut state, Event::DebounceElapsed { generation: 1 });
        resolve(&mut state, issued_ticket(&actions), vec![]);

        assert!(state.movies.is_empty());
        assert!(!state.has_more);
        assert!(!state.loading);
    }

    #[test]
    fn failed_fetch_keeps_movies_and_sets_error() {
        let mut state = started();
        let (_, actions) = handle_event(&mut state, Event::SelectGenre(Genre::Comedy));
        fail(&mut state, issued_ticket(&actions));

        assert_eq!(state.movies.len(), 12);
        assert!(state.has_more);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(OFFLINE_MESSAGE));
    }

    #[test]
    fn stale_drama_batch_is_discarded_after_switch_to_action() {
        let mut state = started();
        let (_, drama) = handle_event(&mut state, Event::SelectGenre(Genre::Drama));
        let (_, action) = handle_event(&mut state, Event::SelectGenre(Genre::Action));
        let drama = issued_ticket(&drama);
        let action = issued_ticket(&action);

        assert!(!resolve(&mut state, drama, batch("drama-", 12)));
        assert!(state.loading);
        assert!(state.movies[0].id.starts_with("p1-"));

        resolve(&mut state, action, batch("action-", 12));
        assert!(state.movies.iter().all(|movie| movie.id.starts_with("action-")));
        assert_eq!(state.selected_genre, Genre::Action);
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut state = started();
        let (_, first) = handle_event(&mut state, Event::SelectGenre(Genre::Drama));
        handle_event(&mut state, Event::SelectGenre(Genre::Action));

        assert!(!fail(&mut state, issued_ticket(&first)));
        assert!(state.error.is_none());
        assert!(state.loading);
    }

    #[test]
    fn retry_reissues_failed_page() {
        let mut state = started();
        let (_, actions) = handle_event(&mut state, Event::LoadNextPage);
        fail(&mut state, issued_ticket(&actions));

        let (_, actions) = handle_event(&mut state, Event::Retry);
        let ticket = issued_ticket(&actions);
        assert_eq!(ticket.page, 2);
        assert_eq!(ticket.mode, FetchMode::Append);
        assert!(state.error.is_none());

        resolve(&mut state, ticket, batch("p2-", 12));
        assert_eq!(state.movies.len(), 24);
    }

    #[test]
    fn retry_ignored_while_loading() {
        let mut state = new_state();
        handle_event(&mut state, Event::Start);
        let (render, actions) = handle_event(&mut state, Event::Retry);
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn open_details_requests_recommendations() {
        let mut state = started();
        let (_, actions) = handle_event(&mut state, Event::OpenDetails("p1-2".into()));

        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::FetchRecommendations { movie_id, count: 6, .. })]
                if movie_id == "p1-2"
        ));
        assert_eq!(state.selected_movie.as_ref().map(|m| m.id.as_str()), Some("p1-2"));
        assert!(state.recommendations_loading);
    }

    #[test]
    fn open_unknown_movie_is_ignored() {
        let mut state = started();
        let (render, actions) = handle_event(&mut state, Event::OpenDetails("nope".into()));
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.selected_movie.is_none());
    }

    #[test]
    fn recommendations_for_closed_movie_are_discarded() {
        let mut state = started();
        handle_event(&mut state, Event::OpenDetails("p1-2".into()));
        handle_event(&mut state, Event::CloseDetails);

        let response = WorkerResponse::RecommendationsFetched {
            request: state.recommendation_request,
            movie_id: "p1-2".into(),
            movies: batch("rec-", 6),
        };
        let (render, _) = handle_event(&mut state, Event::WorkerResponse(response));
        assert!(!render);
        assert!(state.recommendations.is_empty());
    }

    #[test]
    fn recommendations_from_earlier_opening_of_same_movie_are_discarded() {
        let mut state = started();
        let (_, first) = handle_event(&mut state, Event::OpenDetails("p1-2".into()));
        handle_event(&mut state, Event::CloseDetails);
        let (_, second) = handle_event(&mut state, Event::OpenDetails("p1-2".into()));
        let (first, second) = (recommendation_request(&first), recommendation_request(&second));
        assert_ne!(first, second);

        let stale = WorkerResponse::RecommendationsFetched {
            request: first,
            movie_id: "p1-2".into(),
            movies: batch("old-", 6),
        };
        let (render, _) = handle_event(&mut state, Event::WorkerResponse(stale));
        assert!(!render);
        assert!(state.recommendations.is_empty());
        assert!(state.recommendations_loading);

        let fresh = WorkerResponse::RecommendationsFetched {
            request: second,
            movie_id: "p1-2".into(),
            movies: batch("new-", 6),
        };
        handle_event(&mut state, Event::WorkerResponse(fresh));
        assert_eq!(state.recommendations[0].id, "new-0");
        assert!(!state.recommendations_loading);
    }

    #[test]
    fn recommendations_for_open_movie_are_applied() {
        let mut state = started();
        let (_, actions) = handle_event(&mut state, Event::OpenDetails("p1-2".into()));

        let response = WorkerResponse::RecommendationsFetched {
            request: recommendation_request(&actions),
            movie_id: "p1-2".into(),
            movies: batch("rec-", 6),
        };
        handle_event(&mut state, Event::WorkerResponse(response));
        assert_eq!(state.recommendations.len(), 6);
        assert!(!state.recommendations_loading);

        let (_, actions) = handle_event(&mut state, Event::OpenDetails("rec-0".into()));
        assert_eq!(actions.len(), 1);
        assert_eq!(state.selected_movie.as_ref().map(|m| m.id.as_str()), Some("rec-0"));
    }
}
