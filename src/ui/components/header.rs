//! Title bar and genre bar.

use crate::ui::helpers::{pad_line, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title with the watchlist badge at the right edge.
///
/// The badge uses the accent color while the watchlist-only view is active.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let badge = format!("♥ Watchlist ({}) ", header.watchlist_count);
    let badge_len = text_width(&badge);
    let title = truncate(&header.title, cols.saturating_sub(badge_len));
    let title_len = text_width(&title);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&title);
    let used = padding + title_len;
    if used + badge_len <= cols {
        pad_line(out, used + badge_len, cols);
        if header.watchlist_active {
            out.push_str(&Theme::fg(&theme.colors.accent));
        } else {
            out.push_str(&Theme::fg(&theme.colors.favorite_fg));
        }
        out.push_str(&badge);
    } else {
        pad_line(out, used, cols);
    }

    out.push_str(Theme::reset());
    row + 1
}

/// Renders the genre tabs, centered, with the active tab highlighted.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_genre_bar(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let width: usize = header
        .genres
        .iter()
        .map(|tab| text_width(tab.label) + 2)
        .sum::<usize>()
        + header.genres.len().saturating_sub(1);
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(padding));
    for (index, tab) in header.genres.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        if tab.is_active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.accent));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&format!(" {} ", tab.label));
        out.push_str(Theme::reset());
    }
    pad_line(out, padding + width, cols);

    row + 1
}
