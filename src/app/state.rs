//! Catalog state and view model computation.
//!
//! [`CatalogState`] is the single source of truth for one catalog session:
//! the loaded movies, the watchlist, the search and genre filters, the
//! pagination cursor and the loading/error status. It is mutated only by
//! [`handle_event`](super::handle_event); everything else reads it.
//!
//! # State Components
//!
//! - **Movies**: batches in load order; replaced by a fresh fetch, extended by load-more
//! - **Favorites**: the watchlist, the only persisted part
//! - **Search**: the typed text and the effective (debounced) query
//! - **Pagination**: `page`, `has_more`, and the in-flight ticket
//! - **Details**: the open movie and its recommendations
//!
//! # Example
//!
//! ```rust
//! use cinemagic::app::CatalogState;
//! use cinemagic::domain::Favorites;
//!
//! let state = CatalogState::new(Favorites::default(), 12, 6);
//! assert_eq!(state.page, 1);
//! assert!(state.has_more);
//! let viewmodel = state.compute_viewmodel(0, 24, 80);
//! assert_eq!(viewmodel.header.watchlist_count, 0);
//! ```

use super::modes::ViewMode;
use crate::domain::{Favorites, Genre, Movie};
use crate::ui::helpers::truncate;
use crate::ui::input::Target;
use crate::ui::viewmodel::{
    BodyView, DetailsView, DisplayItem, EmptyState, FooterInfo, GenreTab, GridView, HeaderInfo,
    MessageKind, SearchBarInfo, UIViewModel,
};
use crate::worker::{FetchMode, FetchTicket};

/// Rows used by everything except the movie rows in the grid layout.
const CHROME_ROWS: usize = 12;

/// Widest title shown in a grid row.
const TITLE_COLUMN_WIDTH: usize = 40;

/// Central catalog state container.
#[derive(Debug, Clone)]
pub struct CatalogState {
    /// Loaded movies in load order. Ids may repeat across appended pages.
    pub movies: Vec<Movie>,

    /// The watchlist.
    pub favorites: Favorites,

    /// Search text as last typed.
    pub search_input: String,

    /// Effective search text: the input after it stayed unchanged for the
    /// debounce window.
    pub search_query: String,

    pub selected_genre: Genre,

    /// Client-side page counter, 1-based.
    pub page: u32,

    /// False once a batch came back empty.
    pub has_more: bool,

    /// True while a catalog fetch is in flight.
    ///
    /// Also the mutual exclusion flag for load-more.
    pub loading: bool,

    /// User-facing message of the last failed fetch.
    pub error: Option<String>,

    pub view_mode: ViewMode,

    /// Ticket of the one catalog request whose answer will be accepted.
    pub in_flight: Option<FetchTicket>,

    /// Movie shown in the detail pane.
    pub selected_movie: Option<Movie>,

    /// Movies similar to `selected_movie`.
    pub recommendations: Vec<Movie>,

    pub recommendations_loading: bool,

    pub(crate) next_ticket_id: u64,
    /// Bumped on every detail-pane opening; recommendations answering an
    /// older opening are dropped.
    pub(crate) recommendation_request: u64,
    pub(crate) debounce_generation: u64,
    pub(crate) batch_size: usize,
    pub(crate) recommendation_count: usize,
}

impl CatalogState {
    /// Creates the start-of-session state around a restored watchlist.
    #[must_use]
    pub fn new(favorites: Favorites, batch_size: usize, recommendation_count: usize) -> Self {
        Self {
            movies: Vec::new(),
            favorites,
            search_input: String::new(),
            search_query: String::new(),
            selected_genre: Genre::All,
            page: 1,
            has_more: true,
            loading: false,
            error: None,
            view_mode: ViewMode::Catalog,
            in_flight: None,
            selected_movie: None,
            recommendations: Vec::new(),
            recommendations_loading: false,
            next_ticket_id: 0,
            recommendation_request: 0,
            debounce_generation: 0,
            batch_size,
            recommendation_count,
        }
    }

    #[must_use]
    pub fn show_favorites_only(&self) -> bool {
        self.view_mode == ViewMode::FavoritesOnly
    }

    /// Movies to display for the current view mode, in load order.
    #[must_use]
    pub fn visible_movies(&self) -> Vec<&Movie> {
        match self.view_mode {
            ViewMode::Catalog => self.movies.iter().collect(),
            ViewMode::FavoritesOnly => self
                .movies
                .iter()
                .filter(|movie| self.favorites.contains(&movie.id))
                .collect(),
        }
    }

    /// Whether a load-more request would be honored right now.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading && !self.show_favorites_only()
    }

    /// Whether `ticket` belongs to the request currently awaited.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.in_flight.as_ref().is_some_and(|current| current.id == ticket.id)
    }

    /// Looks up a movie by id among loaded movies, then recommendations.
    #[must_use]
    pub fn find_movie(&self, id: &str) -> Option<&Movie> {
        self.movies
            .iter()
            .chain(self.recommendations.iter())
            .find(|movie| movie.id == id)
    }

    /// Maps a typed target to the id of a movie the user can act on.
    ///
    /// Without a target this is the open movie, or the visible row at
    /// `selected` when no detail pane is open. Positions are 1-based and index
    /// the recommendations while details are open. An id resolves only if a
    /// loaded movie or recommendation has it, or it is already on the
    /// watchlist (so it can still be removed).
    #[must_use]
    pub fn resolve_target(&self, selected: usize, target: Option<&Target>) -> Option<String> {
        let movie = match (target, &self.selected_movie) {
            (Some(Target::Id(id)), _) => {
                let known = self.find_movie(id).is_some() || self.favorites.contains(id);
                return known.then(|| id.clone());
            }
            (Some(Target::Position(position)), Some(_)) => {
                self.recommendations.get(position.checked_sub(1)?)
            }
            (Some(Target::Position(position)), None) => {
                self.visible_movies().get(position.checked_sub(1)?).copied()
            }
            (None, Some(open)) => Some(open),
            (None, None) => self.visible_movies().get(selected).copied(),
        };
        movie.map(|movie| movie.id.clone())
    }

    /// Starts a new detail-pane opening and returns its request number.
    pub(crate) fn issue_recommendation_request(&mut self) -> u64 {
        self.recommendation_request += 1;
        self.recommendation_request
    }

    /// Issues a ticket for the current (query, genre, page) and marks it as
    /// the one in flight, superseding any earlier request.
    pub(crate) fn issue_ticket(&mut self, mode: FetchMode) -> FetchTicket {
        self.next_ticket_id += 1;
        let ticket = FetchTicket {
            id: self.next_ticket_id,
            query: self.search_query.clone(),
            genre: self.selected_genre,
            page: self.page,
            mode,
            limit: self.batch_size,
        };

        self.in_flight = Some(ticket.clone());
        self.loading = true;
        self.error = None;
        ticket
    }

    /// Computes a renderable view model.
    ///
    /// `selected` is the front end's cursor into the visible list; it is
    /// clamped here. The grid window is centered on it, shifted to stay full
    /// near either end of the list.
    #[must_use]
    pub fn compute_viewmodel(&self, selected: usize, rows: usize, cols: usize) -> UIViewModel {
        let body = if let Some(movie) = &self.selected_movie {
            BodyView::Details(self.compute_details(movie, cols))
        } else if self.loading && self.movies.is_empty() {
            BodyView::Skeleton {
                rows: rows.saturating_sub(CHROME_ROWS).clamp(1, self.batch_size.max(1)),
            }
        } else if let Some(error) = &self.error {
            BodyView::Message(EmptyState {
                kind: MessageKind::Error,
                message: "Lights, Camera, Errors!".to_string(),
                subtitle: error.clone(),
                hint: Some("Type `retry` to re-run the scene.".to_string()),
            })
        } else {
            let visible = self.visible_movies();
            if visible.is_empty() {
                BodyView::Message(self.compute_no_matches())
            } else {
                BodyView::Grid(self.compute_grid(&visible, selected, rows, cols))
            }
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                is_pending: self.search_input != self.search_query,
            },
            footer: Self::compute_footer(&body),
            body,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: "CineMagic".to_string(),
            genres: Genre::ALL
                .iter()
                .map(|genre| GenreTab {
                    label: genre.label(),
                    is_active: *genre == self.selected_genre,
                })
                .collect(),
            watchlist_count: self.favorites.len(),
            watchlist_active: self.show_favorites_only(),
        }
    }

    fn compute_no_matches(&self) -> EmptyState {
        let subtitle = if self.show_favorites_only() {
            "Your watchlist is empty. Start adding some masterpieces!".to_string()
        } else {
            format!(
                "We couldn't find any results for \"{}\". Try a different term?",
                self.search_query
            )
        };

        EmptyState {
            kind: MessageKind::NoMatches,
            message: "No Matches Found".to_string(),
            subtitle,
            hint: None,
        }
    }

    fn compute_grid(&self, visible: &[&Movie], selected: usize, rows: usize, cols: usize) -> GridView {
        let title = if self.show_favorites_only() {
            "Your Cinematic Watchlist".to_string()
        } else if !self.search_query.is_empty() {
            format!("Search Results for \"{}\"", self.search_query)
        } else {
            format!("{} Masterpieces", self.selected_genre)
        };

        let selected = selected.min(visible.len() - 1);
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(visible.len());
        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let title_width = TITLE_COLUMN_WIDTH.min(cols.saturating_sub(36).max(8));
        let items = visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| {
                let index = visible_start + offset;
                self.compute_display_item(movie, index, index == selected, title_width)
            })
            .collect();

        let trailer = if self.show_favorites_only() {
            None
        } else if self.has_more && self.loading {
            Some("Summoning more movies...".to_string())
        } else if !self.has_more && !self.movies.is_empty() {
            Some("You've reached the edge of the galaxy.".to_string())
        } else {
            None
        };

        GridView {
            title,
            summary: format!("{} movies found", visible.len()),
            items,
            trailer,
        }
    }

    fn compute_display_item(&self, movie: &Movie, index: usize, is_selected: bool, title_width: usize) -> DisplayItem {
        DisplayItem {
            position: index + 1,
            title: truncate(&movie.title, title_width),
            year: movie.year,
            rating: format!("{:.1}", movie.rating),
            genre: movie.genre.clone(),
            runtime: movie.runtime.clone(),
            is_favorite: self.favorites.contains(&movie.id),
            is_selected,
        }
    }

    fn compute_details(&self, movie: &Movie, cols: usize) -> DetailsView {
        let is_favorite = self.favorites.contains(&movie.id);
        let title_width = cols.saturating_sub(36).max(8);

        DetailsView {
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            rating: format!("{}/10", movie.rating),
            year: movie.year,
            runtime: movie.runtime.clone(),
            description: movie.description.clone(),
            director: movie.director.clone(),
            cast: movie.cast.join(", "),
            poster_url: movie.poster().to_string(),
            watchlist_label: if is_favorite { "On Watchlist" } else { "Add to Watchlist" }.to_string(),
            is_favorite,
            recommendations: self
                .recommendations
                .iter()
                .enumerate()
                .map(|(index, rec)| self.compute_display_item(rec, index, false, title_width))
                .collect(),
            recommendations_loading: self.recommendations_loading,
        }
    }

    fn compute_footer(body: &BodyView) -> FooterInfo {
        let keybindings = match body {
            BodyView::Details(_) => "close: back  fav: toggle watchlist  open <n>: similar movie  q: quit",
            BodyView::Message(EmptyState { kind: MessageKind::Error, .. }) => {
                "retry: re-run scene  /text: search  genre <name>  q: quit"
            }
            BodyView::Skeleton { .. } | BodyView::Message(_) => {
                "/text: search  genre <name>  watchlist  help  q: quit"
            }
            BodyView::Grid(_) => {
                "/text: search  genre <name>  j/k: move  open [n]  fav [n]  more  watchlist  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
