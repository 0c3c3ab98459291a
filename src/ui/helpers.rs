//! Shared rendering utilities.
//!
//! Components write into a frame buffer (`String`) rather than straight to
//! stdout, so a whole frame can be tested and flushed in one write. Widths
//! are measured in characters, never bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col` (`\u{1b}[{row};{col}H`).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Number of characters in `text`.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
///
/// ```rust
/// use cinemagic::ui::helpers::truncate;
///
/// assert_eq!(truncate("Heat", 10), "Heat");
/// assert_eq!(truncate("The Good, the Bad and the Ugly", 12), "The Good,...");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }

    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// Writes `used` characters' worth of trailing spaces up to `cols`.
pub fn pad_line(out: &mut String, used: usize, cols: usize) {
    out.push_str(&" ".repeat(cols.saturating_sub(used)));
}

/// Writes `text` centered within `cols`, filling the whole line.
pub fn write_centered(out: &mut String, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    pad_line(out, padding + len, cols);
}

/// Greedy word wrap to `width` characters per line.
///
/// Words longer than `width` are truncated rather than split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word = truncate(word, width);
        if line.is_empty() {
            line = word;
        } else if text_width(&line) + 1 + text_width(&word) <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Writes a full-width horizontal rule in `color`.
pub fn write_rule(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
}

/// Removes ANSI CSI sequences, leaving the visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Amélie", 6), "Amélie");
        assert_eq!(truncate("千と千尋の神隠し", 5), "千と...");
        assert_eq!(truncate("Alien", 2), "Al");
    }

    #[test]
    fn centered_text_fills_line() {
        let mut out = String::new();
        write_centered(&mut out, "abc", 9);
        assert_eq!(out, "   abc   ");
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap("a thief who steals corporate secrets", 12);
        assert_eq!(lines, vec!["a thief who", "steals", "corporate", "secrets"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn strip_ansi_keeps_visible_text() {
        let mut out = String::new();
        position_cursor(&mut out, 3, 1);
        out.push_str(&Theme::fg("#ffffff"));
        out.push_str("Heat");
        out.push_str(Theme::reset());
        assert_eq!(strip_ansi(&out), "Heat");
    }
}
