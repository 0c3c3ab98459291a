//! Composable UI component renderers.
//!
//! Each component writes one region of the frame into a shared buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with watchlist badge, and the genre bar
//! - [`search`]: Search input box
//! - [`table`]: Movie grid with heading and trailer line
//! - [`details`]: Detail pane with recommendations
//! - [`message`]: Error / no-results messages and the loading skeleton
//! - [`footer`]: Command hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Genre bar]
//! [Border]
//! [Search Bar - 3 lines]
//! [Body]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod details;
mod footer;
mod header;
mod message;
mod search;
mod table;

use crate::ui::helpers::{position_cursor, write_rule};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use details::render_details;
use footer::render_footer;
use header::{render_genre_bar, render_header};
use message::{render_message, render_skeleton};
use search::render_search_bar;
use table::render_grid;

fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    write_rule(out, color, cols);
    row + 1
}

/// Renders the full layout for one frame into `out`.
///
/// The footer occupies the last row and its border the row above; the body
/// is drawn between the search bar and that border.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_genre_bar(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);

    let footer_start = rows.max(current_row + 2);
    let border_row = footer_start - 1;

    match &vm.body {
        BodyView::Skeleton { rows: bars } => {
            render_skeleton(out, current_row, *bars, theme, cols);
        }
        BodyView::Message(message) => {
            render_message(out, current_row, message, theme, cols);
        }
        BodyView::Grid(grid) => {
            render_grid(out, current_row, grid, theme, cols);
        }
        BodyView::Details(details) => {
            render_details(out, current_row, border_row, details, theme, cols);
        }
    }

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_start, &vm.footer, theme, cols);
}
