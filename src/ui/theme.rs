//! Color palettes and ANSI escape sequences.
//!
//! A [`Theme`] is a named palette of hex colors. Two Catppuccin palettes are
//! compiled in (`catppuccin-mocha`, the default, and `catppuccin-latte`);
//! any other palette is read from a TOML file with the same shape as
//! `themes/catppuccin-mocha.toml`:
//!
//! ```toml
//! name = "noir"
//!
//! [colors]
//! header_fg = "#ffffff"
//! # header_bg is optional
//! selection_fg = "#000000"
//! selection_bg = "#d0d0d0"
//! text_normal = "#c0c0c0"
//! text_dim = "#707070"
//! border = "#404040"
//! search_bar_border = "#d0d0d0"
//! accent = "#ffffff"
//! favorite_fg = "#ff5f5f"
//! rating_fg = "#ffd75f"
//! error_fg = "#ff5f5f"
//! empty_state_fg = "#ffffff"
//! skeleton_fg = "#303030"
//! ```
//!
//! Escape sequences are 24-bit (`38;2` / `48;2`):
//!
//! ```rust
//! use cinemagic::ui::Theme;
//!
//! let theme = Theme::default();
//! let title = format!("{}{}CineMagic{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
//! assert!(title.ends_with("\u{1b}[0m"));
//! ```

use crate::domain::{CinemagicError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names accepted by [`Theme::from_name`].
pub const BUILT_IN_THEMES: [&str; 2] = ["catppuccin-mocha", "catppuccin-latte"];

/// A named palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for each screen element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title, grid heading and column headers.
    pub header_fg: String,
    /// Title bar fill; unset leaves the terminal background.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted movie row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Summary line, footer and hints.
    pub text_dim: String,

    /// Horizontal rules.
    pub border: String,

    pub search_bar_border: String,

    /// Active genre tab and watchlist badge.
    pub accent: String,
    /// Watchlist heart.
    pub favorite_fg: String,
    pub rating_fg: String,
    pub error_fg: String,

    /// "No Matches Found" message color.
    pub empty_state_fg: String,

    /// Placeholder bars shown while loading.
    pub skeleton_fg: String,
}

impl Theme {
    /// Looks up a compiled-in palette; `None` for names outside
    /// [`BUILT_IN_THEMES`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use cinemagic::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };
        toml::from_str(source).ok()
    }

    /// Reads a palette from a TOML file. Every color except `header_bg` is
    /// required.
    ///
    /// # Errors
    ///
    /// Returns [`CinemagicError::Theme`] if the file cannot be read or the
    /// TOML is invalid or incomplete.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| CinemagicError::Theme(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&source)
            .map_err(|e| CinemagicError::Theme(format!("invalid theme {}: {e}", path.display())))
    }

    /// Parses `#rrggbb` (the `#` is optional); malformed input is white.
    fn rgb(hex: &str) -> (u8, u8, u8) {
        let digits = hex.trim().trim_start_matches('#');
        let value = if digits.len() == 6 {
            u32::from_str_radix(digits, 16).unwrap_or(0x00ff_ffff)
        } else {
            0x00ff_ffff
        };

        let [_, r, g, b] = value.to_be_bytes();
        (r, g, b)
    }

    fn truecolor(layer: u8, hex: &str) -> String {
        let (r, g, b) = Self::rgb(hex);
        format!("\u{1b}[{layer};2;{r};{g};{b}m")
    }

    /// Foreground color sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::truecolor(38, hex)
    }

    /// Background color sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::truecolor(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

/// Catppuccin Mocha.
///
/// # Panics
///
/// Panics if the embedded palette does not parse; `built_in_themes_parse`
/// covers this.
impl Default for Theme {
    fn default() -> Self {
        Self::from_name(BUILT_IN_THEMES[0]).expect("embedded catppuccin-mocha palette parses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_themes_parse() {
        for name in BUILT_IN_THEMES {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::default().name, "catppuccin-mocha");
    }

    #[test]
    fn hex_colors_become_truecolor_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("#nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);
    }

    #[test]
    fn incomplete_theme_file_is_theme_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "name = \"broken\"\n[colors]\nheader_fg = \"#fff\"\n").unwrap();

        assert!(matches!(Theme::from_file(&path), Err(CinemagicError::Theme(_))));
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(CinemagicError::Theme(_))
        ));
    }
}
