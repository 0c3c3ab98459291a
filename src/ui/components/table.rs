//! Movie list renderer.
//!
//! Rows are laid out as fixed columns: position, watchlist heart, title,
//! year, rating, genre, runtime. The title column width was already chosen
//! by the view model (titles arrive truncated).

use crate::ui::helpers::{pad_line, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, GridView};

const GENRE_WIDTH: usize = 12;

/// Renders the grid heading, column headers, rows and trailer line.
///
/// # Returns
///
/// The next available row position.
pub fn render_grid(out: &mut String, row: usize, grid: &GridView, theme: &Theme, cols: usize) -> usize {
    let title_width = grid
        .items
        .iter()
        .map(|item| text_width(&item.title))
        .max()
        .unwrap_or(0)
        .max(5);

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    let title = truncate(&grid.title, cols);
    out.push_str(&title);
    pad_line(out, text_width(&title), cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&grid.summary);
    pad_line(out, text_width(&grid.summary), cols);
    out.push_str(Theme::reset());

    let mut current_row = render_column_headers(out, row + 2, title_width, theme);
    current_row = render_rows(out, current_row, &grid.items, title_width, theme, cols);

    if let Some(trailer) = &grid.trailer {
        position_cursor(out, current_row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str("    ");
        out.push_str(trailer);
        out.push_str(Theme::reset());
        current_row += 1;
    }
    current_row
}

fn render_column_headers(out: &mut String, row: usize, title_width: usize, theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!(
        "{:>3}   {:<title_width$} {:<4}  {:>6}  {:<GENRE_WIDTH$}  {}",
        "#", "TITLE", "YEAR", "RATING", "GENRE", "RUNTIME"
    ));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders `items` one per row starting at `row`.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_rows(
    out: &mut String,
    row: usize,
    items: &[DisplayItem],
    title_width: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_row(out, current_row, item, title_width, theme, cols);
    }
    current_row
}

/// Renders a single movie row.
///
/// Selected rows use the selection colors across the full terminal width;
/// the heart and rating keep their own colors on unselected rows only.
fn render_row(out: &mut String, row: usize, item: &DisplayItem, title_width: usize, theme: &Theme, cols: usize) -> usize {
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(out, row, 1);
    out.push_str(&base);
    out.push_str(&format!("{:>3} ", item.position));

    if item.is_favorite && !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.favorite_fg));
    }
    out.push_str(if item.is_favorite { "♥ " } else { "  " });
    out.push_str(&base);

    out.push_str(&format!("{:<title_width$} {:<4}  ", item.title, item.year));

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.rating_fg));
    }
    out.push_str(&format!("{:>6}", format!("★ {}", item.rating)));
    out.push_str(&base);

    let genre = truncate(&item.genre, GENRE_WIDTH);
    let rest = format!("  {genre:<GENRE_WIDTH$}  {}", item.runtime);
    out.push_str(&rest);

    let used = 6 + title_width.max(text_width(&item.title)) + 7 + 6 + text_width(&rest);
    pad_line(out, used, cols);
    out.push_str(Theme::reset());
    row + 1
}
