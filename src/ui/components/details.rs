//! Detail pane for the open movie.

use super::table::render_rows;
use crate::ui::helpers::{pad_line, position_cursor, text_width, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailsView;

/// Left margin for everything in the pane.
const INDENT: &str = "  ";

/// Renders the movie facts followed by the "More Like This" list.
///
/// Nothing is drawn at or below `last_row`; the description is wrapped and
/// cut to fit, and recommendations that do not fit are dropped.
///
/// # Layout
///
/// ```text
/// Title (year)
/// Genre · ★ 8.8/10 · 2h 28m
///
/// description, wrapped
///
/// Director: ...
/// Cast: ...
/// Poster: ...
/// [♥ On Watchlist]
///
/// More Like This
///   1   Similar title ...
/// ```
pub fn render_details(out: &mut String, row: usize, last_row: usize, details: &DetailsView, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(INDENT.len() * 2).max(1);
    let mut row = row;

    let line = |out: &mut String, row: &mut usize, color: &str, text: &str| {
        if *row >= last_row {
            return;
        }
        let text = truncate(text, width);
        position_cursor(out, *row, 1);
        out.push_str(&Theme::fg(color));
        out.push_str(INDENT);
        out.push_str(&text);
        pad_line(out, INDENT.len() + text_width(&text), cols);
        out.push_str(Theme::reset());
        *row += 1;
    };

    out.push_str(Theme::bold());
    line(out, &mut row, &theme.colors.header_fg, &format!("{} ({})", details.title, details.year));
    line(
        out,
        &mut row,
        &theme.colors.rating_fg,
        &format!("{} · ★ {} · {}", details.genre, details.rating, details.runtime),
    );
    row += 1;

    let description = wrap(&details.description, width);
    let budget = last_row.saturating_sub(row).saturating_sub(8).max(1);
    for text in description.iter().take(budget) {
        line(out, &mut row, &theme.colors.text_normal, text);
    }
    row += 1;

    line(out, &mut row, &theme.colors.text_normal, &format!("Director: {}", details.director));
    line(out, &mut row, &theme.colors.text_normal, &format!("Cast: {}", details.cast));
    line(out, &mut row, &theme.colors.text_dim, &format!("Poster: {}", details.poster_url));

    let (badge, color) = if details.is_favorite {
        (format!("[♥ {}]", details.watchlist_label), &theme.colors.favorite_fg)
    } else {
        (format!("[+ {}]", details.watchlist_label), &theme.colors.accent)
    };
    line(out, &mut row, color, &badge);
    row += 1;

    out.push_str(Theme::bold());
    line(out, &mut row, &theme.colors.header_fg, "More Like This");

    if details.recommendations_loading {
        line(out, &mut row, &theme.colors.text_dim, "Finding similar movies...");
    } else if details.recommendations.is_empty() {
        line(out, &mut row, &theme.colors.text_dim, "No similar movies found.");
    } else {
        let fit = last_row.saturating_sub(row);
        let items = &details.recommendations[..details.recommendations.len().min(fit)];
        let title_width = items.iter().map(|item| text_width(&item.title)).max().unwrap_or(0);
        row = render_rows(out, row, items, title_width, theme, cols);
    }

    row
}
