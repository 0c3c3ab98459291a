//! Controller behavior against a scripted provider on a paused clock.

use async_trait::async_trait;
use cinemagic::app::OFFLINE_MESSAGE;
use cinemagic::provider::{MovieProvider, MovieQuery, ProviderError};
use cinemagic::storage::{FavoritesRepository, KeyValueStore, MemoryStorage, DEFAULT_FAVORITES_KEY};
use cinemagic::ui::BodyView;
use cinemagic::{CatalogController, CinemagicError, ControllerSettings, Genre, Movie};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

enum Scripted {
    Batch(usize),
    Fail,
}

/// Provider that records every query, answers from a script (full batches
/// once the script runs out) and delays answers per genre.
#[derive(Clone, Default)]
struct ScriptedProvider {
    queries: Arc<Mutex<Vec<MovieQuery>>>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
    delays: HashMap<Option<Genre>, Duration>,
}

impl ScriptedProvider {
    fn with_script(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            ..Self::default()
        }
    }

    fn with_delay(mut self, genre: Genre, delay: Duration) -> Self {
        self.delays.insert(genre.as_filter(), delay);
        self
    }

    fn queries(&self) -> Vec<MovieQuery> {
        self.queries.lock().unwrap().clone()
    }
}

fn movie(id: String, genre: &str) -> Movie {
    Movie {
        title: format!("Title {id}"),
        id,
        year: 1995,
        rating: 8.1,
        description: "Two professionals on opposite sides of the law.".to_string(),
        genre: genre.to_string(),
        poster_url: String::new(),
        backdrop_url: String::new(),
        director: "Michael Mann".to_string(),
        cast: vec!["Al Pacino".to_string(), "Robert De Niro".to_string()],
        runtime: "2h 50m".to_string(),
    }
}

#[async_trait]
impl MovieProvider for ScriptedProvider {
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<Movie>, ProviderError> {
        let call = {
            let mut queries = self.queries.lock().unwrap();
            queries.push(query.clone());
            queries.len()
        };
        let scripted = self.script.lock().unwrap().pop_front();

        if let Some(delay) = self.delays.get(&query.genre) {
            tokio::time::sleep(*delay).await;
        }

        let genre = query.genre.map_or("All", Genre::label);
        match scripted.unwrap_or(Scripted::Batch(query.limit)) {
            Scripted::Batch(count) => Ok((0..count)
                .map(|i| movie(format!("{genre}-{call}-{i}"), genre))
                .collect()),
            Scripted::Fail => Err(ProviderError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
        }
    }

    async fn recommend(&self, title: &str, count: usize) -> Result<Vec<Movie>, ProviderError> {
        Ok((0..count).map(|i| movie(format!("like-{title}-{i}"), "Drama")).collect())
    }
}

/// Backend whose every read and write fails.
struct BrokenStorage;

impl KeyValueStore for BrokenStorage {
    fn get_item(&self, _key: &str) -> cinemagic::Result<Option<String>> {
        Err(CinemagicError::Storage("disk unplugged".to_string()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> cinemagic::Result<()> {
        Err(CinemagicError::Storage("disk unplugged".to_string()))
    }
}

fn controller_with<S: KeyValueStore>(provider: ScriptedProvider, storage: S) -> CatalogController<ScriptedProvider, S> {
    let favorites = FavoritesRepository::new(storage, DEFAULT_FAVORITES_KEY);
    CatalogController::new(provider, favorites, ControllerSettings::default())
}

/// Processes events until no fetch is in flight and the search text settled.
async fn settle<S: KeyValueStore>(controller: &mut CatalogController<ScriptedProvider, S>) {
    while controller.state().loading || controller.state().search_input != controller.state().search_query {
        controller.process_next().await;
    }
}

#[tokio::test(start_paused = true)]
async fn start_loads_first_batch() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());

    assert!(controller.start());
    assert!(controller.state().loading);
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.movies.len(), 12);
    assert_eq!(state.page, 1);
    assert!(state.has_more);
    assert_eq!(
        controller.provider().queries(),
        vec![MovieQuery {
            search: None,
            genre: None,
            limit: 12
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn burst_of_typing_fetches_once_with_last_text() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    let typed_at = Instant::now();
    for text in ["h", "he", "hea", "heat"] {
        controller.set_search_query(text);
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.state().search_query, "");

    settle(&mut controller).await;

    assert!(typed_at.elapsed() >= Duration::from_millis(600));
    assert_eq!(controller.state().search_query, "heat");
    let queries = controller.provider().queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].search.as_deref(), Some("heat"));
}

#[tokio::test(start_paused = true)]
async fn typing_within_window_restarts_timer() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    controller.set_search_query("a");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(400)).await;

    controller.set_search_query("ab");
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(400)).await;

    // 800ms after the first keystroke, but only 400ms after the last one.
    controller.process_pending();
    assert_eq!(controller.state().search_query, "");

    settle(&mut controller).await;
    assert_eq!(controller.state().search_query, "ab");
    assert_eq!(controller.provider().queries().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn settling_on_current_query_does_not_fetch() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    controller.set_search_query("x");
    controller.set_search_query("");
    controller.process_next().await;

    assert!(!controller.state().loading);
    assert_eq!(controller.provider().queries().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn superseded_genre_response_is_discarded() {
    let provider = ScriptedProvider::default()
        .with_delay(Genre::Drama, Duration::from_secs(1))
        .with_delay(Genre::Action, Duration::from_secs(5));
    let mut controller = controller_with(provider, MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;
    let first_batch = controller.state().movies.clone();

    controller.set_genre(Genre::Drama);
    controller.set_genre(Genre::Action);

    // Drama answers first but was superseded.
    assert!(!controller.process_next().await);
    assert_eq!(controller.state().movies, first_batch);
    assert!(controller.state().loading);

    assert!(controller.process_next().await);
    let state = controller.state();
    assert_eq!(state.selected_genre, Genre::Action);
    assert!(!state.loading);
    assert!(state.movies.iter().all(|movie| movie.genre == "Action"));
}

#[tokio::test(start_paused = true)]
async fn empty_batch_ends_infinite_scroll() {
    let provider = ScriptedProvider::with_script([Scripted::Batch(12), Scripted::Batch(0)]);
    let mut controller = controller_with(provider, MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    assert!(controller.load_next_page());
    assert_eq!(controller.state().page, 2);
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.movies.len(), 12);
    assert!(!state.has_more);
    assert!(!controller.load_next_page());
    assert_eq!(controller.provider().queries().len(), 2);

    let BodyView::Grid(grid) = controller.state().compute_viewmodel(0, 40, 100).body else {
        panic!("expected the movie grid");
    };
    assert_eq!(grid.trailer.as_deref(), Some("You've reached the edge of the galaxy."));
}

#[tokio::test(start_paused = true)]
async fn load_next_page_ignored_while_loading_or_in_watchlist() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    assert!(!controller.load_next_page());
    settle(&mut controller).await;

    controller.toggle_favorites_view();
    assert!(!controller.load_next_page());

    controller.toggle_favorites_view();
    assert!(controller.load_next_page());
    settle(&mut controller).await;
    assert_eq!(controller.provider().queries().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_page_keeps_movies_and_retry_appends() {
    let provider = ScriptedProvider::with_script([Scripted::Batch(12), Scripted::Fail]);
    let mut controller = controller_with(provider, MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    controller.load_next_page();
    settle(&mut controller).await;

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some(OFFLINE_MESSAGE));
    assert_eq!(state.movies.len(), 12);
    assert_eq!(state.page, 2);

    assert!(controller.retry());
    assert_eq!(controller.state().error, None);
    settle(&mut controller).await;

    assert_eq!(controller.state().movies.len(), 24);
    assert_eq!(controller.provider().queries().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn watchlist_survives_restart() {
    let storage = MemoryStorage::new();

    {
        let mut controller = controller_with(ScriptedProvider::default(), storage.clone());
        controller.toggle_favorite("m1");
        controller.toggle_favorite("m2");
        controller.toggle_favorite("m1");
    }

    assert_eq!(
        storage.get_item(DEFAULT_FAVORITES_KEY).unwrap().as_deref(),
        Some(r#"["m2"]"#)
    );

    let controller = controller_with(ScriptedProvider::default(), storage);
    assert!(controller.favorites().contains("m2"));
    assert!(!controller.favorites().contains("m1"));
}

#[tokio::test(start_paused = true)]
async fn unreadable_storage_starts_with_empty_watchlist() {
    let mut controller = controller_with(ScriptedProvider::default(), BrokenStorage);
    assert!(controller.favorites().is_empty());

    controller.start();
    settle(&mut controller).await;
    assert_eq!(controller.state().movies.len(), 12);
    assert_eq!(controller.state().error, None);
}

#[tokio::test(start_paused = true)]
async fn failed_watchlist_write_keeps_favorite_without_error() {
    let mut controller = controller_with(ScriptedProvider::default(), BrokenStorage);
    controller.start();
    settle(&mut controller).await;

    let id = controller.state().movies[0].id.clone();
    assert!(controller.toggle_favorite(id.clone()));
    assert!(controller.favorites().contains(&id));
    assert_eq!(controller.state().error, None);

    controller.toggle_favorites_view();
    assert_eq!(controller.visible_movies().len(), 1);

    assert!(controller.toggle_favorite(id.clone()));
    assert!(!controller.favorites().contains(&id));
    assert_eq!(controller.state().error, None);
}

#[tokio::test(start_paused = true)]
async fn watchlist_view_shows_only_favorites_in_load_order() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    let ids: Vec<String> = controller.state().movies.iter().map(|m| m.id.clone()).collect();
    controller.toggle_favorite(ids[5].clone());
    controller.toggle_favorite(ids[2].clone());
    controller.toggle_favorites_view();

    let visible: Vec<&str> = controller.visible_movies().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(visible, vec![ids[2].as_str(), ids[5].as_str()]);
}

#[tokio::test(start_paused = true)]
async fn details_receive_recommendations() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    let id = controller.state().movies[0].id.clone();
    assert!(controller.open_movie(id.clone()));
    assert!(controller.state().recommendations_loading);

    assert!(controller.process_next().await);
    let state = controller.state();
    assert_eq!(state.selected_movie.as_ref().map(|m| m.id.as_str()), Some(id.as_str()));
    assert_eq!(state.recommendations.len(), 6);
    assert!(!state.recommendations_loading);
}

#[tokio::test(start_paused = true)]
async fn reopening_movie_ignores_earlier_recommendations() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    let id = controller.state().movies[0].id.clone();
    controller.open_movie(id.clone());
    controller.close_movie();
    controller.open_movie(id.clone());

    // The first opening answers first and is dropped.
    assert!(!controller.process_next().await);
    assert!(controller.state().recommendations_loading);
    assert!(controller.state().recommendations.is_empty());

    assert!(controller.process_next().await);
    assert_eq!(controller.state().recommendations.len(), 6);
    assert!(!controller.state().recommendations_loading);
}

#[tokio::test(start_paused = true)]
async fn recommendations_for_closed_movie_are_dropped() {
    let mut controller = controller_with(ScriptedProvider::default(), MemoryStorage::new());
    controller.start();
    settle(&mut controller).await;

    let id = controller.state().movies[0].id.clone();
    controller.open_movie(id);
    assert!(controller.close_movie());

    assert!(!controller.process_next().await);
    assert!(controller.state().recommendations.is_empty());
    assert!(controller.state().selected_movie.is_none());
}
