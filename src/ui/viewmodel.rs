//! View model types representing renderable UI state.
//!
//! View models are computed from [`CatalogState`](crate::app::CatalogState)
//! by `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings and flags only; every decision about what to show has already been
//! made by the time a view model exists.
//!
//! # Body precedence
//!
//! Exactly one [`BodyView`] is chosen per frame:
//!
//! 1. an open movie shows [`BodyView::Details`]
//! 2. loading with no movies yet shows [`BodyView::Skeleton`]
//! 3. an error shows [`BodyView::Message`] with [`MessageKind::Error`]
//! 4. an empty visible list shows [`BodyView::Message`] with [`MessageKind::NoMatches`]
//! 5. otherwise [`BodyView::Grid`]

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub body: BodyView,
    pub footer: FooterInfo,
}

/// Title bar with genre tabs and the watchlist badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub genres: Vec<GenreTab>,
    /// Number of ids on the watchlist.
    pub watchlist_count: usize,
    /// Whether the watchlist-only view is active.
    pub watchlist_active: bool,
}

/// One entry of the genre bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreTab {
    pub label: &'static str,
    pub is_active: bool,
}

/// Search input box state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed, possibly not yet settled.
    pub query: String,
    /// True while the typed text differs from the effective query.
    pub is_pending: bool,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    /// Placeholder rows shown while the first batch loads.
    Skeleton { rows: usize },
    /// Centered message (error or no results).
    Message(EmptyState),
    /// Movie list.
    Grid(GridView),
    /// Detail pane for the open movie.
    Details(DetailsView),
}

/// Which centered message is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    NoMatches,
}

/// Centered message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub kind: MessageKind,

    /// Primary message (e.g., "No Matches Found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,

    /// Optional command hint shown under the subtitle.
    pub hint: Option<String>,
}

/// Movie list with its heading and trailer line.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// e.g. `Search Results for "heat"` or `Drama Masterpieces`.
    pub title: String,
    /// e.g. `12 movies found`.
    pub summary: String,
    /// Rows inside the visible window.
    pub items: Vec<DisplayItem>,
    /// Loading indicator or end-of-list line.
    pub trailer: Option<String>,
}

/// One movie row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    /// 1-based position in the visible list, as typed in `fav <n>`.
    pub position: usize,
    pub title: String,
    pub year: i32,
    pub rating: String,
    pub genre: String,
    pub runtime: String,
    pub is_favorite: bool,
    pub is_selected: bool,
}

/// Detail pane for a single movie.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub title: String,
    pub genre: String,
    pub rating: String,
    pub year: i32,
    pub runtime: String,
    pub description: String,
    pub director: String,
    pub cast: String,
    pub poster_url: String,
    /// "On Watchlist" or "Add to Watchlist".
    pub watchlist_label: String,
    pub is_favorite: bool,
    pub recommendations: Vec<DisplayItem>,
    pub recommendations_loading: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text.
    pub keybindings: String,
}
