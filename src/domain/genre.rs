//! Genre filter enumeration.

use std::fmt;
use std::str::FromStr;

/// Closed set of genre filters offered by the catalog.
///
/// [`Genre::All`] is a wildcard meaning "no genre filter"; it is never a tag
/// carried by a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genre {
    #[default]
    All,
    Action,
    Comedy,
    Drama,
    SciFi,
    Horror,
    Romance,
    Animation,
}

impl Genre {
    /// Every genre in display order, starting with the wildcard.
    pub const ALL: [Self; 8] = [
        Self::All,
        Self::Action,
        Self::Comedy,
        Self::Drama,
        Self::SciFi,
        Self::Horror,
        Self::Romance,
        Self::Animation,
    ];

    /// Display label, as shown in the genre bar and sent to the provider.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Action => "Action",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::SciFi => "Sci-Fi",
            Self::Horror => "Horror",
            Self::Romance => "Romance",
            Self::Animation => "Animation",
        }
    }

    /// Returns the genre to filter by, or `None` for the wildcard.
    ///
    /// ```
    /// use cinemagic::Genre;
    ///
    /// assert_eq!(Genre::All.as_filter(), None);
    /// assert_eq!(Genre::Drama.as_filter(), Some(Genre::Drama));
    /// ```
    #[must_use]
    pub const fn as_filter(self) -> Option<Self> {
        match self {
            Self::All => None,
            other => Some(other),
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known genre.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre: {0}")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    /// Parses a genre label, ignoring case, spaces and dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | ' ' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|genre| {
                genre
                    .label()
                    .chars()
                    .filter(|c| *c != '-')
                    .flat_map(char::to_lowercase)
                    .eq(normalized.chars())
            })
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}
