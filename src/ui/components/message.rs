//! Centered messages and the loading placeholder.

use crate::ui::helpers::{position_cursor, write_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, MessageKind};

/// Blank rows between the top of the body and a centered message.
const MESSAGE_OFFSET: usize = 2;

/// Renders an error or no-results message starting near `row`.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
/// MESSAGE
/// subtitle
/// [blank line]
/// hint
/// ```
///
/// The message uses `error_fg` for errors and `empty_state_fg` otherwise;
/// subtitle and hint are dimmed.
pub fn render_message(out: &mut String, row: usize, message: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let color = match message.kind {
        MessageKind::Error => &theme.colors.error_fg,
        MessageKind::NoMatches => &theme.colors.empty_state_fg,
    };
    let mut row = row + MESSAGE_OFFSET;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(color));
    write_centered(out, &message.message, cols);
    out.push_str(Theme::reset());
    row += 1;

    position_cursor(out, row, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_centered(out, &message.subtitle, cols);
    out.push_str(Theme::reset());
    row += 1;

    if let Some(hint) = &message.hint {
        row += 1;
        position_cursor(out, row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        write_centered(out, hint, cols);
        out.push_str(Theme::reset());
        row += 1;
    }

    row
}

/// Renders `rows` placeholder bars under a loading caption.
pub fn render_skeleton(out: &mut String, row: usize, rows: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_centered(out, "Rolling the film...", cols);
    out.push_str(Theme::reset());

    let bar_width = cols.saturating_sub(8);
    let mut row = row + 2;
    for index in 0..rows {
        // Alternate bar lengths so the placeholder reads as a list.
        let width = if index % 2 == 0 { bar_width } else { bar_width * 2 / 3 };
        position_cursor(out, row, 1);
        out.push_str("    ");
        out.push_str(&Theme::fg(&theme.colors.skeleton_fg));
        out.push_str(&"▒".repeat(width));
        out.push_str(Theme::reset());
        row += 1;
    }
    row
}
