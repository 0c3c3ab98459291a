//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `CatalogState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! Output is one string per frame. It positions the cursor absolutely but
//! does not clear the screen; the caller decides when to clear.
//!
//! # Example
//!
//! ```rust
//! use cinemagic::app::CatalogState;
//! use cinemagic::domain::Favorites;
//! use cinemagic::ui::{render, Theme};
//!
//! let state = CatalogState::new(Favorites::default(), 12, 6);
//! let frame = render(&state, 0, &Theme::default(), 24, 80);
//! assert!(frame.contains("CineMagic"));
//! ```

use crate::app::CatalogState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the catalog screen for `state` with the cursor on `selected`.
#[must_use]
pub fn render(state: &CatalogState, selected: usize, theme: &Theme, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(selected, rows, cols);
    render_viewmodel(&viewmodel, theme, rows, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::with_capacity(rows * cols * 4);
    components::render_layout(&mut out, vm, theme, cols, rows);
    out.push_str(Theme::reset());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::sample;
    use crate::domain::{Favorites, Genre, Movie};
    use crate::ui::helpers::strip_ansi;

    fn frame(state: &CatalogState, selected: usize) -> String {
        strip_ansi(&render(state, selected, &Theme::default(), 30, 100))
    }

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            ..sample(id)
        }
    }

    #[test]
    fn skeleton_while_first_batch_loads() {
        let mut state = CatalogState::new(Favorites::default(), 12, 6);
        state.loading = true;

        let text = frame(&state, 0);
        assert!(text.contains("Rolling the film..."));
        assert!(text.contains("▒"));
    }

    #[test]
    fn grid_lists_titles_with_watchlist_hearts() {
        let mut state = CatalogState::new(Favorites::from_ids(["m2".to_string()]), 12, 6);
        state.selected_genre = Genre::Drama;
        state.movies = vec![movie("m1", "Heat"), movie("m2", "Ran")];

        let text = frame(&state, 0);
        assert!(text.contains("Drama Masterpieces"));
        assert!(text.contains("2 movies found"));
        assert!(text.contains("Heat"));
        assert!(text.contains("♥ Ran"));
        assert!(text.contains("♥ Watchlist (1)"));
    }

    #[test]
    fn error_message_with_retry_hint() {
        let mut state = CatalogState::new(Favorites::default(), 12, 6);
        state.error = Some("offline".to_string());

        let text = frame(&state, 0);
        assert!(text.contains("Lights, Camera, Errors!"));
        assert!(text.contains("Type `retry` to re-run the scene."));
    }

    #[test]
    fn pending_search_is_marked() {
        let mut state = CatalogState::new(Favorites::default(), 12, 6);
        state.movies = vec![movie("m1", "Heat")];
        state.search_input = "hea".to_string();

        assert!(frame(&state, 0).contains("Search: hea searching..."));
    }

    #[test]
    fn details_pane_shows_recommendations() {
        let mut state = CatalogState::new(Favorites::default(), 12, 6);
        state.selected_movie = Some(movie("m1", "Heat"));
        state.recommendations = vec![movie("r1", "Ronin")];

        let text = frame(&state, 0);
        assert!(text.contains("Add to Watchlist"));
        assert!(text.contains("More Like This"));
        assert!(text.contains("Ronin"));
    }
}
